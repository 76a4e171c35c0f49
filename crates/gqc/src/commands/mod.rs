/// The `gqc checkout` command.
pub mod checkout;
/// The `gqc list` command.
pub mod list;
/// The `gqc repos` command.
pub mod repos;

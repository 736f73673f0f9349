pub mod ledger;
pub mod settings;

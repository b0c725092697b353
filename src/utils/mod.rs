mod alias;

pub use alias::AliasGenerator;

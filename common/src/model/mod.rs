pub mod csv;
pub mod datasource;
pub mod export;
pub mod validation;

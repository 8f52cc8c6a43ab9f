pub mod market;
pub mod scheme;
pub mod session;
pub mod site;

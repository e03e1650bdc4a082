pub mod bill;
pub mod category;
pub mod customer;
pub mod notification;
pub mod settings;
pub mod store;

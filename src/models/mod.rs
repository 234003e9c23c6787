pub mod entities;
pub mod health;
pub mod notification;
pub mod response;
pub mod template;
pub mod validation;

mod digest;
mod integration;
mod schedule;
mod status;
mod subscription;
mod user;

pub mod dtos {
    pub use crate::digest::dtos::*;
    pub use crate::schedule::dtos::*;
    pub use crate::subscription::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::digest::api::*;
pub use crate::integration::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
pub use crate::subscription::api::*;
pub use crate::user::api::*;

// This file makes the screen modules available to the rest of the application.

pub mod auth;
pub mod map;
pub mod subscription;

#![forbid(unsafe_code)]

//! # vexil-service
//!
//! The fetch/decode adapter between the transport layer and the loader:
//! bytes come from a [`vexil_net::Net`] transport and are decoded into a
//! [`vexil_core::Image`] before they reach the cache.

mod error;
mod service;
mod traits;

pub use crate::{
    error::{ServiceError, ServiceResult},
    service::{DefaultImageService, ImageService},
    traits::ImageSource,
};

//! Recognition service API
//!
//! Typed client for the two backend endpoints:
//! - `POST /recognize-gesture` takes a camera frame and returns an interim or
//!   final recognition
//! - `POST /text-to-sign` maps text to an ordered list of sign clips

pub mod client;
pub mod types;

pub use client::{HttpSignApi, SignApi};
pub use types::{
    normalize_label, ApiError, ApiResult, RecognitionResult, RecognizeResponse, SignItem,
    TextToSignResponse,
};

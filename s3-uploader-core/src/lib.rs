#![doc = "s3-uploader-core: core logic library for s3-uploader."]

//! This crate holds the business logic of s3-uploader: which files are picked
//! up, which key they land under, and how uploads are dispatched.
//! The network client itself lives in the CLI crate behind [`contract::ObjectStore`].
//!
//! # Usage
//! Build tasks with [`plan::plan_uploads`], then hand them to [`dispatch::dispatch`]
//! together with any [`contract::ObjectStore`] implementation.

pub mod classify;
pub mod content_type;
pub mod contract;
pub mod dispatch;
pub mod key;
pub mod plan;
pub mod walk;

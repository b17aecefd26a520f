//! Backplane serverless functions client.
//!
//! Manages and invokes functions at `/v1/projects/{project}/functions/...`.
//!
//! # Usage
//!
//! ```ignore
//! use backplane_functions::{FunctionDeployment, FunctionsClient, InvokeOptions};
//! use serde_json::json;
//!
//! let functions = FunctionsClient::new(transport);
//! functions.deploy(FunctionDeployment::new("hello", source)).await?;
//!
//! let response = functions.invoke("hello", InvokeOptions::new()
//!     .body(json!({"name": "World"}))
//! ).await?;
//! let greeting: String = response.json()?;
//! ```

pub mod client;
pub mod types;

pub use client::FunctionsClient;
pub use types::*;

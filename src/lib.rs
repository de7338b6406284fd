//! MyBudget - budget tracking with an authorization-gated HTTP API
//!
//! Users own budgets and the expenses recorded against them. Every request
//! is authenticated with a bearer token and checked against the budget's
//! owner before anything is read or changed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Budgets, expenses, users, ids, money and client commands
//! - `validation`: Declarative command validation
//! - `auth`: Principals and authorization policies
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `export`: JSON, YAML and CSV renderings
//! - `api`: axum HTTP surface
//! - `cli` / `display`: administrative command line
//!
//! # Example
//!
//! ```rust,ignore
//! use mybudget::config::{MyBudgetPaths, Settings};
//!
//! let paths = MyBudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{MyBudgetError, MyBudgetResult};

//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation of the panel: the admin
//! server lifecycle endpoints, the authentication flows, data access, and the client
//! for the daemons running on each node. The backend uses Axum as the web framework
//! and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, flash messages and DTO conversion
//! - **Service Layer** (`service/`) - Business logic, transactions and daemon orchestration
//! - **Data Layer** (`data/`) - Database operations over a connection or an open transaction
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Admin guard, server context loading and session wrappers
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP client, daemon client, email)
//! - **Startup** (`startup`) - Initialization of database, sessions, and HTTP client
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** checks the admin session and loads the viewed server
//! 3. **Controller** converts form input to params, calls service
//! 4. **Service** validates, runs the transaction and calls the daemon
//! 5. **Data** reads and writes rows
//! 6. **Controller** returns a JSON view model or queues a flash message and redirects

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

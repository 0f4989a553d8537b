//! A line-oriented text-buffer engine.
//!
//! Copyright 2024 David Edwards
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <https://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.
//!
//! A document is held in [`Lines`](lines::Lines) and edited through a
//! [`Session`](session::Session), which keeps a cursor and viewport consistent with
//! the document and reports changes as [`Notification`](session::Notification)s.
//! Saving optionally pipes the document through an external formatter.
pub mod clip;
pub mod config;
pub mod cursor;
pub mod edit;
pub mod error;
pub mod etc;
pub mod format;
pub mod io;
pub mod lines;
pub mod op;
pub mod opt;
pub mod render;
pub mod session;
pub mod sys;
pub mod term;
pub mod viewport;
pub mod word;

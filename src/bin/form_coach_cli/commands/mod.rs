// ABOUTME: Re-exports command modules for form-coach-cli
// ABOUTME: Provides access to replay and catalogue commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod catalog;
pub mod replay;

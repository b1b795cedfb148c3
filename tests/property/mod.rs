// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property test modules

mod domain_values;
mod site_mutations;

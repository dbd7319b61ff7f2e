// ABOUTME: Command modules for kinetic-cli
// ABOUTME: Workout generation commands and catalog listing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

pub mod catalog;
pub mod workout;

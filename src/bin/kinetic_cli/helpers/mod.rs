// ABOUTME: Helper modules for kinetic-cli
// ABOUTME: Output formatting shared by the commands
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

pub mod display;

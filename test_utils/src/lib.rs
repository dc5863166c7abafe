// SPDX-License-Identifier: MIT

pub mod arrays;
pub mod tasks;

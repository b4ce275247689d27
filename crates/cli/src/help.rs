// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help output styling.

use anstyle::{Ansi256Color, Color, Style};
use clap::builder::styling::Styles;

use crate::colors::{self, codes};

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Clap styles matching the colors used for task output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::HEADER))
        .usage(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
        .valid(fg(codes::CONTEXT))
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `tarn explain <code>`: describe an error code from the registry.

use std::process;

use tarn_diagnostics::codes::ErrorCodeRegistry;

use crate::output;

pub fn cmd_explain(code: &str) {
    let registry = ErrorCodeRegistry::default();
    let normalized = code.to_ascii_uppercase();

    match registry.get(&normalized) {
        Some(info) => {
            println!("{}: {}", output::title(info.code), info.title);
            println!("{} {}", output::dim("category:"), info.category);
        }
        None => {
            eprintln!("{}: unknown error code `{}`", output::error_label(), code);
            let mut known: Vec<&str> = registry.all().map(|info| info.code).collect();
            known.sort_unstable();
            eprintln!("{} {}", output::dim("known codes:"), known.join(", "));
            process::exit(1);
        }
    }
}

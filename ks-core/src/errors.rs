pub use anyhow::{anyhow, bail, ensure};
use lazy_static::lazy_static;
pub use paste::paste;
use regex::{Regex, RegexBuilder};
pub use thiserror::Error;

pub type EmptyResult = anyhow::Result<()>;

// Frames from these locations are runtime/toolchain noise
const SKIPPED_FRAME_MARKERS: [&str; 3] = ["/.build/", "/rustc/", "glibc"];

lazy_static! {
    static ref FRAME_RE: Option<Regex> = RegexBuilder::new(r"^\s+\d+(?s:.*?)(\s+at\s+.*:\d+)$")
        .multi_line(true)
        .build()
        .ok();
}

// This macro creates an enum which derives from thiserror::Error, and also
// creates constructor functions in snake case for each of the enum variants
#[macro_export]
macro_rules! err_impl {
    (@hidden $errtype:ident, $item:ident, String) => {
        paste! {
            pub(crate) fn [<$item:snake>](in_: &str) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.into())}
            }
        }
    };

    (@hidden $errtype:ident, $item:ident, $($dtype:tt)::+) => {
        paste! {
            pub(crate) fn [<$item:snake>](in_: &$($dtype)::+) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.clone())}
            }
        }
    };

    ($errtype:ident,
        $(#[$errinfo:meta] $item:ident($($dtype:tt)::+),)+
    ) => {
        #[derive(Debug, Error)]
        pub enum $errtype {
            $(#[$errinfo] $item($($dtype)::+)),+
        }

        impl $errtype {
            $(err_impl! {@hidden $errtype, $item, $($dtype)::+})+
        }
    };
}

fn skipped_marker(count: usize) -> String {
    match count {
        1 => "      -- <skipped 1 frame> --".into(),
        n => format!("      -- <skipped {n} frames> --"),
    }
}

// Cut a backtrace down to the frames that point at our own code, collapsing each run of runtime
// frames into a single "skipped" line.  If the backtrace doesn't look like one we know how to
// read, it comes back unchanged.
pub fn prune_backtrace(bt: &str) -> String {
    let Some(re) = FRAME_RE.as_ref() else {
        return bt.into();
    };

    let mut lines = vec![];
    let mut skipped = 0;
    for frame in re.find_iter(bt).map(|m| m.as_str()) {
        if SKIPPED_FRAME_MARKERS.iter().any(|marker| frame.contains(marker)) {
            skipped += 1;
        } else if !frame.is_empty() {
            if skipped > 0 {
                lines.push(skipped_marker(skipped));
            }
            lines.push(frame.to_string());
            skipped = 0;
        }
    }
    if skipped > 0 {
        lines.push(skipped_marker(skipped));
    }

    if lines.is_empty() {
        return bt.into();
    }
    lines.join("\n")
}

// Logs an error that's about to take the program down, along with the relevant part of its
// backtrace; it's too expensive for anything that happens regularly.
#[macro_export]
macro_rules! kserr {
    ($err:ident, $msg:literal $(, $args:expr)* $(,)?) => {
        let bt = $crate::errors::prune_backtrace(&$err.backtrace().to_string());
        tracing::error!(concat!($msg, "\n\n{}\n\nPartial Stack Trace:\n\n{}\n\n") $(, $args)*, $err, bt);
    };
}

pub use {err_impl, kserr};

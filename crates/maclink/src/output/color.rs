//! Terminal colorization.
//!
//! The palette and the background heuristic follow iproute2: a light
//! palette by default, the bold variant when `COLORFGBG` reports a dark
//! background. The scheme is decided once at startup and carried in
//! [`super::OutputOptions`].

use std::env;
use std::str::FromStr;

use crate::error::Error;
use crate::records::Family;

/// The `--color[=WHEN]` argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Never,
    Auto,
    Always,
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            other => Err(Error::usage(format!("invalid color mode: {other}"))),
        }
    }
}

/// Colored output spans.
#[derive(Debug, Clone, Copy)]
enum Attr {
    Ifname,
    Mac,
    Inet,
    Inet6,
    StateUp,
    StateDown,
}

/// The resolved color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    None,
    Light,
    Dark,
}

impl ColorScheme {
    /// Decide the scheme for this run. JSON output is never colored;
    /// `auto` requires a terminal on stdout and no `NO_COLOR`.
    pub fn detect(mode: ColorMode, json: bool) -> Self {
        if json {
            return ColorScheme::None;
        }
        match mode {
            ColorMode::Never => ColorScheme::None,
            ColorMode::Always => Self::palette(),
            ColorMode::Auto => {
                if atty::is(atty::Stream::Stdout) && env::var_os("NO_COLOR").is_none() {
                    Self::palette()
                } else {
                    ColorScheme::None
                }
            }
        }
    }

    /// `COLORFGBG` holds semicolon-separated fg;bg terminal colors; a
    /// last field of 0-6 or 8 means a dark background.
    fn palette() -> Self {
        let dark = env::var("COLORFGBG").is_ok_and(|v| {
            v.rsplit(';')
                .next()
                .is_some_and(|bg| matches!(bg, "0" | "1" | "2" | "3" | "4" | "5" | "6" | "8"))
        });
        if dark { ColorScheme::Dark } else { ColorScheme::Light }
    }

    fn paint(self, attr: Attr, text: &str) -> String {
        let code = match (self, attr) {
            (ColorScheme::None, _) => return text.to_string(),
            (ColorScheme::Light, Attr::Ifname) => "\x1b[36m",
            (ColorScheme::Light, Attr::Mac) => "\x1b[33m",
            (ColorScheme::Light, Attr::Inet) => "\x1b[35m",
            (ColorScheme::Light, Attr::Inet6) => "\x1b[34m",
            (ColorScheme::Light, Attr::StateUp) => "\x1b[32m",
            (ColorScheme::Light, Attr::StateDown) => "\x1b[31m",
            (ColorScheme::Dark, Attr::Ifname) => "\x1b[1;36m",
            (ColorScheme::Dark, Attr::Mac) => "\x1b[1;33m",
            (ColorScheme::Dark, Attr::Inet) => "\x1b[1;35m",
            (ColorScheme::Dark, Attr::Inet6) => "\x1b[1;34m",
            (ColorScheme::Dark, Attr::StateUp) => "\x1b[1;32m",
            (ColorScheme::Dark, Attr::StateDown) => "\x1b[1;31m",
        };
        format!("{code}{text}\x1b[0m")
    }

    pub fn ifname(self, text: &str) -> String {
        self.paint(Attr::Ifname, text)
    }

    pub fn mac(self, text: &str) -> String {
        self.paint(Attr::Mac, text)
    }

    pub fn inet(self, family: Family, text: &str) -> String {
        match family {
            Family::Inet => self.paint(Attr::Inet, text),
            Family::Inet6 => self.paint(Attr::Inet6, text),
        }
    }

    /// Color an address by its textual family (IPv6 if it has a colon).
    pub fn inet_guess(self, text: &str) -> String {
        let family = if text.contains(':') {
            Family::Inet6
        } else {
            Family::Inet
        };
        self.inet(family, text)
    }

    /// Color an operational state: UP green, DOWN red, anything else
    /// plain.
    pub fn oper_state(self, name: &str) -> String {
        match name {
            "UP" => self.paint(Attr::StateUp, name),
            "DOWN" => self.paint(Attr::StateDown, name),
            _ => name.to_string(),
        }
    }

    /// Color a socket state: established green, everything else red.
    pub fn socket_state(self, name: &str) -> String {
        if name == "ESTAB" {
            self.paint(Attr::StateUp, name)
        } else {
            self.paint(Attr::StateDown, name)
        }
    }
}

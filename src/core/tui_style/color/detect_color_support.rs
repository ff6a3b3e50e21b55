// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal color support detection, with a global override/cache so that the SGR
//! renderer doesn't re-examine environment variables on every cell it paints.

use std::{env, sync::atomic::{AtomicI8, Ordering}};

/// Caching accessors for [`ColorSupport`] detection.
///
/// [`detect()`] checks an explicit [`set_override`] first, then a memoized result from
/// [`examine_env_vars_to_determine_color_support`], only falling through to the
/// (comparatively expensive) environment scan on a cold cache.
pub mod global_color_support {
    use super::{AtomicI8, ColorSupport, Ordering, Stream,
                examine_env_vars_to_determine_color_support};

    static COLOR_SUPPORT_GLOBAL: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);
    static COLOR_SUPPORT_CACHED: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);

    const NOT_SET_VALUE: i8 = -1;

    #[must_use]
    pub fn detect() -> ColorSupport {
        match try_get_override() {
            Ok(it) => it,
            Err(()) => {
                if let Ok(cached) = try_get_cached() {
                    cached
                } else {
                    let detected =
                        examine_env_vars_to_determine_color_support(Stream::Stdout);
                    set_cached(detected);
                    detected
                }
            }
        }
    }

    /// Override the color support. Regardless of the value of the environment
    /// variables, the value set here will be used by [`detect()`].
    ///
    /// Tests that call this should be annotated `#[serial]` (see the `serial_test`
    /// crate), since the override is process-global.
    #[allow(clippy::result_unit_err)]
    pub fn set_override(value: ColorSupport) {
        COLOR_SUPPORT_GLOBAL.store(i8::from(value), Ordering::Release);
    }

    pub fn clear_override() {
        COLOR_SUPPORT_GLOBAL.store(NOT_SET_VALUE, Ordering::Release);
    }

    /// Clear the cached detection result, forcing re-detection on the next
    /// uncached call.
    pub fn clear_cache() {
        COLOR_SUPPORT_CACHED.store(NOT_SET_VALUE, Ordering::Release);
    }

    #[allow(clippy::result_unit_err)]
    pub fn try_get_cached() -> Result<ColorSupport, ()> {
        ColorSupport::try_from(COLOR_SUPPORT_CACHED.load(Ordering::Acquire))
    }

    pub fn set_cached(value: ColorSupport) {
        COLOR_SUPPORT_CACHED.store(i8::from(value), Ordering::Release);
    }

    #[allow(clippy::result_unit_err)]
    pub fn try_get_override() -> Result<ColorSupport, ()> {
        ColorSupport::try_from(COLOR_SUPPORT_GLOBAL.load(Ordering::Acquire))
    }
}

/// Determine whether color is supported heuristically, based on environment
/// variables and TTY-ness. Expensive; callers should go through
/// [`global_color_support::detect`] instead of calling this directly.
#[must_use]
pub fn examine_env_vars_to_determine_color_support(stream: Stream) -> ColorSupport {
    if helpers::env_no_color()
        || env::var("TERM").is_ok_and(|v| v == "dumb")
        || !(helpers::is_a_tty(stream)
            || env::var("IGNORE_IS_TERMINAL").is_ok_and(|v| v != "0"))
    {
        return ColorSupport::NoColor;
    }

    if env::consts::OS == "macos" {
        if env::var("TERM_PROGRAM").is_ok_and(|v| v == "Apple_Terminal")
            && env::var("TERM").is_ok_and(|term| helpers::check_256_color(&term))
        {
            return ColorSupport::Ansi256;
        }

        if env::var("TERM_PROGRAM").is_ok_and(|v| v == "iTerm.app")
            || env::var("COLORTERM").is_ok_and(|v| v == "truecolor")
        {
            return ColorSupport::Truecolor;
        }
    }

    if env::consts::OS == "linux" && env::var("COLORTERM").is_ok_and(|v| v == "truecolor")
    {
        return ColorSupport::Truecolor;
    }

    if env::consts::OS == "windows" {
        return ColorSupport::Truecolor;
    }

    if env::var("COLORTERM").is_ok()
        || env::var("TERM").is_ok_and(|term| helpers::check_ansi_color(&term))
        || env::var("CLICOLOR").is_ok_and(|v| v != "0")
        || is_ci::uncached()
    {
        return ColorSupport::Truecolor;
    }

    ColorSupport::NoColor
}

/// The stream to check for color support.
#[derive(Clone, Copy, Debug)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// The result of the color support check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Truecolor,
    Ansi256,
    Grayscale,
    NoColor,
}

mod convert_between_color_and_i8 {
    impl TryFrom<i8> for super::ColorSupport {
        type Error = ();

        #[rustfmt::skip]
        fn try_from(value: i8) -> Result<Self, Self::Error> {
            match value {
                1 => Ok(super::ColorSupport::Ansi256),
                2 => Ok(super::ColorSupport::Truecolor),
                3 => Ok(super::ColorSupport::NoColor),
                4 => Ok(super::ColorSupport::Grayscale),
                _ => Err(()),
            }
        }
    }

    impl From<super::ColorSupport> for i8 {
        #[rustfmt::skip]
        fn from(value: super::ColorSupport) -> Self {
            match value {
                super::ColorSupport::Ansi256   => 1,
                super::ColorSupport::Truecolor => 2,
                super::ColorSupport::NoColor   => 3,
                super::ColorSupport::Grayscale => 4,
            }
        }
    }
}

mod helpers {
    use super::{Stream, as_str, env};

    #[must_use]
    pub fn is_a_tty(stream: Stream) -> bool {
        use std::io::IsTerminal;
        match stream {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }

    #[must_use]
    pub fn check_256_color(term: &str) -> bool {
        term.ends_with("256") || term.ends_with("256color")
    }

    #[must_use]
    pub fn check_ansi_color(term: &str) -> bool {
        term.starts_with("screen")
            || term.starts_with("vscode")
            || term.starts_with("xterm")
            || term.starts_with("vt100")
            || term.starts_with("vt220")
            || term.starts_with("rxvt")
            || term.contains("color")
            || term.contains("ansi")
            || term.contains("cygwin")
            || term.contains("linux")
    }

    #[must_use]
    pub fn env_no_color() -> bool {
        match as_str(&env::var("NO_COLOR")) {
            Ok("0") | Err(_) => false,
            Ok(_) => true,
        }
    }
}

fn as_str<E>(option: &Result<String, E>) -> Result<&str, &E> {
    match option {
        Ok(inner) => Ok(inner),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn cycle_1() {
        global_color_support::set_override(ColorSupport::Ansi256);
        assert_eq!(
            global_color_support::try_get_override(),
            Ok(ColorSupport::Ansi256)
        );
    }

    #[test]
    #[serial]
    fn cycle_2() {
        global_color_support::set_override(ColorSupport::Truecolor);
        assert_eq!(
            global_color_support::try_get_override(),
            Ok(ColorSupport::Truecolor)
        );
    }

    #[test]
    #[serial]
    fn cycle_3() {
        global_color_support::set_override(ColorSupport::NoColor);
        assert_eq!(
            global_color_support::try_get_override(),
            Ok(ColorSupport::NoColor)
        );
    }

    #[test]
    #[serial]
    fn cycle_4() {
        global_color_support::set_override(ColorSupport::Grayscale);
        assert_eq!(
            global_color_support::try_get_override(),
            Ok(ColorSupport::Grayscale)
        );
    }

    #[test]
    #[serial]
    fn test_caching_behavior() {
        global_color_support::clear_override();
        global_color_support::clear_cache();

        let first_result = global_color_support::detect();
        assert_eq!(global_color_support::try_get_cached(), Ok(first_result));

        let second_result = global_color_support::detect();
        assert_eq!(first_result, second_result);

        global_color_support::clear_cache();
        assert!(global_color_support::try_get_cached().is_err());
    }

    #[test]
    #[serial]
    fn cycle_5() {
        global_color_support::clear_override();
        assert_eq!(global_color_support::try_get_override(), Err(()));
    }
}

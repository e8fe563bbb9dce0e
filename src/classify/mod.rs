//classify/mod.rs
use regex::Regex;
use std::sync::OnceLock;

/// Problem family a benchmark record belongs to, determined purely by the
/// filename convention of its encoded name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Lp,
    Smt,
    SloaneStufken,
}

pub const SMT2_SUFFIX: &str = ".smt2";

fn stufken_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+-\d+-\d+-\d+-\d+").unwrap())
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Lp, Family::Smt, Family::SloaneStufken];

    /// Classifies a filename. The `LP`/`SMT` prefixes win; otherwise a stem
    /// carrying the five-integer dash pattern is a Sloane-Stufken instance,
    /// and everything else falls back to SMT.
    pub fn classify(filename: &str) -> Family {
        if filename.starts_with("LP") {
            Family::Lp
        } else if filename.starts_with("SMT") {
            Family::Smt
        } else if stufken_pattern().is_match(filename.trim_end_matches(SMT2_SUFFIX)) {
            Family::SloaneStufken
        } else {
            Family::Smt
        }
    }

    /// Fixed filename prefix stripped when decoding the `file` field.
    pub fn file_prefix(self) -> Option<&'static str> {
        match self {
            Family::Lp => Some("LP_"),
            Family::Smt => Some("SMT_"),
            Family::SloaneStufken => None,
        }
    }

    /// Short prefix prepended to the output file name for this family's table.
    pub fn output_prefix(self) -> &'static str {
        match self {
            Family::Lp => "lp",
            Family::Smt => "smt",
            Family::SloaneStufken => "ss",
        }
    }
}

/// Extracts the filename from an encoded benchmark name: the last path
/// segment of the first comma-separated field.
pub fn filename_of(name: &str) -> &str {
    let path = name.split(',').next().unwrap_or(name);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_route_to_their_family() {
        assert_eq!(Family::classify("LP_foo.smt2"), Family::Lp);
        assert_eq!(Family::classify("LPanything"), Family::Lp);
        assert_eq!(Family::classify("SMT_bar.smt2"), Family::Smt);
    }

    #[test]
    fn five_integer_dash_stems_are_sloane_stufken() {
        assert_eq!(Family::classify("5-3-5-3-2.smt2"), Family::SloaneStufken);
        assert_eq!(Family::classify("10-2-10-2-4"), Family::SloaneStufken);
        // An unrelated prefix does not stop the pattern match.
        assert_eq!(Family::classify("run-1-2-3-4-5.smt2"), Family::SloaneStufken);
    }

    #[test]
    fn everything_else_defaults_to_smt() {
        assert_eq!(Family::classify("foo.smt2"), Family::Smt);
        assert_eq!(Family::classify("5-3-5.smt2"), Family::Smt);
        assert_eq!(Family::classify(""), Family::Smt);
    }

    #[test]
    fn lp_smt_prefixes_win_over_the_dash_pattern() {
        assert_eq!(Family::classify("LP_1-2-3-4-5.smt2"), Family::Lp);
        assert_eq!(Family::classify("SMT-1-2-3-4-5"), Family::Smt);
    }

    #[test]
    fn filename_is_last_segment_of_first_field() {
        assert_eq!(filename_of("x/y/LP_foo.smt2,soplex,0.1,0.09,5,opt"), "LP_foo.smt2");
        assert_eq!(filename_of("bare.smt2,qsoptex,0.1,0.1,2,sat"), "bare.smt2");
        assert_eq!(filename_of("no-commas"), "no-commas");
    }
}

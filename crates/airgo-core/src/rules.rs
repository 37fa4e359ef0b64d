// ── Local detection rules ──
//
// One regular expression per line; blank lines are skipped. A missing or
// unopenable file is not an error (the node simply runs without local
// rules); a read failure midway or a pattern that does not compile is.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::DetectRule;
use crate::model::rule::LOCAL_RULE_ID;

/// Load the rule list at `path`. `None` yields an empty list.
pub fn load_rule_list(path: Option<&Path>) -> Result<Vec<DetectRule>, CoreError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "cannot open rule list, continuing without local rules"
            );
            return Ok(Vec::new());
        }
    };

    let mut rules = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| CoreError::RuleFile {
            path: path.to_path_buf(),
            source,
        })?;
        // A blank line would compile to a match-everything rule.
        if line.trim().is_empty() {
            continue;
        }
        let pattern = Regex::new(&line).map_err(|source| CoreError::RulePattern {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        rules.push(DetectRule {
            id: LOCAL_RULE_ID,
            pattern,
        });
    }

    debug!(path = %path.display(), count = rules.len(), "loaded local rule list");
    Ok(rules)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn no_path_means_no_rules() {
        assert!(load_rule_list(None).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let rules = load_rule_list(Some(&dir.path().join("absent.txt"))).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn each_line_becomes_a_local_rule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r"(.+\.|^)(speedtest)\.(net|com)").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "bittorrent").unwrap();

        let rules = load_rule_list(Some(file.path())).unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(|r| r.id == -1));
        assert!(rules[0].pattern.is_match("www.speedtest.net"));
        assert!(rules[1].pattern.is_match("bittorrent-tracker"));
        assert!(!rules[1].pattern.is_match("example.com"));
    }

    #[test]
    fn invalid_pattern_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ok").unwrap();
        writeln!(file, "(unclosed").unwrap();

        let err = load_rule_list(Some(file.path())).unwrap_err();
        assert!(matches!(err, CoreError::RulePattern { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn non_utf8_content_is_a_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();

        let err = load_rule_list(Some(file.path())).unwrap_err();
        assert!(matches!(err, CoreError::RuleFile { .. }), "{err:?}");
    }
}

//! Blocked-action report.

use std::fmt;

use crate::validation::Rejection;

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "❌ BLOCKED: {}", self.headline)?;
        for violation in &self.violations {
            writeln!(f, "   • {violation}")?;
        }

        if let Some((first, rest)) = self.remediation.split_first() {
            writeln!(f)?;
            writeln!(f, "   ✅ {first}")?;
            for line in rest {
                writeln!(f, "   {line}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::{Rejection, RejectionKind, RuleKind};

    #[test]
    fn test_rejection_layout() {
        let rejection = Rejection {
            kind: RejectionKind::Policy(RuleKind::Merge),
            headline: "Git merge is NOT allowed".to_string(),
            violations: vec!["no branching means no merging".to_string()],
            remediation: vec!["Correct workflow:".to_string(), "Work on main".to_string()],
        };

        assert_eq!(
            rejection.to_string(),
            "❌ BLOCKED: Git merge is NOT allowed\n   • no branching means no merging\n\n   ✅ Correct workflow:\n   Work on main\n"
        );
    }

    #[test]
    fn test_rejection_without_remediation() {
        let rejection = Rejection {
            kind: RejectionKind::Parse,
            headline: "PROJECT-PLAN.json must be valid JSON".to_string(),
            violations: vec!["Parse error: EOF".to_string()],
            remediation: Vec::new(),
        };

        assert!(!rejection.to_string().contains('✅'));
    }
}

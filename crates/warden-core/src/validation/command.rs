//! Finding git invocations inside a free-form shell command.
//!
//! This is not a shell parser. The command is cut into segments at unquoted
//! control operators and into words at unquoted whitespace, with quotes and
//! backslash escapes removed. That is enough to tell `git commit -m "merge"`
//! apart from `git merge`, and to see every git call in
//! `git add . && git commit`. Subshells, `eval`, aliases and command
//! substitution are not expanded.

/// Words that run the following words as a command, with their options that
/// consume the next word (`sudo -u dev git ...`).
const COMMAND_WRAPPERS: [(&str, &[&str]); 7] = [
    (
        "sudo",
        &["-u", "-g", "-h", "-p", "-C", "-D", "-R", "-T", "-U", "-r", "-t"],
    ),
    ("env", &["-u", "-C", "--unset", "--chdir"]),
    ("command", &[]),
    ("builtin", &[]),
    ("exec", &["-a"]),
    ("nohup", &[]),
    ("time", &["-f", "-o", "--format", "--output"]),
];

/// Git global options that consume the next word when not written as `--opt=value`.
const GLOBAL_OPTIONS_WITH_VALUE: [&str; 7] = [
    "-C",
    "-c",
    "--git-dir",
    "--work-tree",
    "--namespace",
    "--config-env",
    "--super-prefix",
];

/// A single `git <subcommand> <args...>` call found in a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    /// Lowercased subcommand; empty for `git --version` and the like
    pub subcommand: String,

    /// Words after the subcommand, unquoted
    pub args: Vec<String>,
}

impl GitInvocation {
    /// Returns `true` if this invocation runs `subcommand`.
    pub fn is(&self, subcommand: &str) -> bool {
        self.subcommand == subcommand
    }

    /// Option words, stopping at the `--` that starts pathspecs.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .map(String::as_str)
            .take_while(|arg| *arg != "--")
            .filter(|arg| arg.starts_with('-') && *arg != "-")
    }

    /// Returns `true` if any long option equals `name` or is `name=value`.
    pub fn has_long(&self, name: &str) -> bool {
        self.options().any(|opt| {
            opt == name
                || opt
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('='))
        })
    }

    /// Returns `true` if `flag` appears alone or inside a short-flag cluster (`-fu`).
    pub fn has_short(&self, flag: char) -> bool {
        self.options()
            .filter(|opt| !opt.starts_with("--"))
            .any(|opt| opt[1..].contains(flag))
    }
}

/// Every git invocation in `command`, in order of appearance.
pub fn git_invocations(command: &str) -> Vec<GitInvocation> {
    split_segments(command)
        .into_iter()
        .filter_map(|words| parse_git(&words))
        .collect()
}

fn parse_git(words: &[String]) -> Option<GitInvocation> {
    let mut rest = skip_command_prefix(words).iter();

    let program = rest.next()?;
    if program != "git" && !program.ends_with("/git") {
        return None;
    }

    let mut subcommand = String::new();
    while let Some(word) = rest.next() {
        if GLOBAL_OPTIONS_WITH_VALUE.contains(&word.as_str()) {
            rest.next();
        } else if !word.starts_with('-') {
            subcommand = word.to_lowercase();
            break;
        }
    }

    Some(GitInvocation {
        subcommand,
        args: rest.cloned().collect(),
    })
}

/// Drop leading assignments and wrappers, with the wrappers' options.
fn skip_command_prefix(words: &[String]) -> &[String] {
    let mut i = 0;
    while let Some(word) = words.get(i) {
        if is_assignment(word) {
            i += 1;
            continue;
        }
        let Some((_, with_value)) = COMMAND_WRAPPERS
            .iter()
            .find(|(name, _)| *name == word.as_str())
        else {
            break;
        };
        i += 1;
        while let Some(option) = words.get(i).filter(|w| w.starts_with('-')) {
            i += 1;
            if option == "--" {
                break;
            }
            if with_value.contains(&option.as_str()) {
                i += 1;
            }
        }
    }
    words.get(i..).unwrap_or_default()
}

/// `NAME=value` environment assignment preceding a command.
fn is_assignment(word: &str) -> bool {
    match word.split_once('=') {
        Some((name, _)) => {
            let mut chars = name.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Split a command into segments of unquoted words.
pub(crate) fn split_segments(command: &str) -> Vec<Vec<String>> {
    let mut segments = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    word.push(q);
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => match chars.peek() {
                            Some(&(next @ ('"' | '\\' | '$' | '`'))) => {
                                word.push(next);
                                chars.next();
                            }
                            Some('\n') => {
                                chars.next();
                            }
                            _ => word.push('\\'),
                        },
                        _ => word.push(q),
                    }
                }
            }
            '\\' => match chars.next() {
                Some('\n') | None => {}
                Some(escaped) => {
                    in_word = true;
                    word.push(escaped);
                }
            },
            // `2>&1` and `&>` are redirections, not control operators.
            '&' if word.ends_with('>') || word.ends_with('<') || chars.peek() == Some(&'>') => {
                in_word = true;
                word.push(c);
            }
            ';' | '&' | '|' | '\n' | '(' | ')' => {
                finish_word(&mut words, &mut word, &mut in_word);
                if !words.is_empty() {
                    segments.push(std::mem::take(&mut words));
                }
            }
            c if c.is_whitespace() => finish_word(&mut words, &mut word, &mut in_word),
            _ => {
                in_word = true;
                word.push(c);
            }
        }
    }

    finish_word(&mut words, &mut word, &mut in_word);
    if !words.is_empty() {
        segments.push(words);
    }
    segments
}

fn finish_word(words: &mut Vec<String>, word: &mut String, in_word: &mut bool) {
    if *in_word {
        words.push(std::mem::take(word));
        *in_word = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(segment: &[&str]) -> Vec<String> {
        segment.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_on_control_operators() {
        let segments = split_segments("git add . && git commit -m x; ls | wc -l");
        assert_eq!(
            segments,
            vec![
                words(&["git", "add", "."]),
                words(&["git", "commit", "-m", "x"]),
                words(&["ls"]),
                words(&["wc", "-l"]),
            ]
        );
    }

    #[test]
    fn test_quotes_keep_words_together() {
        let segments = split_segments(r#"git commit -m "merge && push --force" -m 'a b'"#);
        assert_eq!(
            segments,
            vec![words(&[
                "git",
                "commit",
                "-m",
                "merge && push --force",
                "-m",
                "a b"
            ])]
        );
    }

    #[test]
    fn test_empty_quotes_are_a_word() {
        assert_eq!(
            split_segments(r#"git commit -m """#),
            vec![words(&["git", "commit", "-m", ""])]
        );
    }

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(
            split_segments(r#"echo a\ b "q\"x" "c\d""#),
            vec![words(&["echo", "a b", "q\"x", "c\\d"])]
        );
    }

    #[test]
    fn test_redirections_do_not_split() {
        assert_eq!(
            split_segments("git push -f 2>&1"),
            vec![words(&["git", "push", "-f", "2>&1"])]
        );
        assert_eq!(
            split_segments("git status &> out.log"),
            vec![words(&["git", "status", "&>", "out.log"])]
        );
    }

    #[test]
    fn test_git_invocations_skip_global_options_and_env() {
        let found = git_invocations("GIT_TRACE=1 git -C repo --no-pager -c core.x=y Merge dev");
        assert_eq!(
            found,
            vec![GitInvocation {
                subcommand: "merge".to_string(),
                args: words(&["dev"]),
            }]
        );
    }

    #[test]
    fn test_git_invocations_ignore_other_programs() {
        assert!(git_invocations("cat .gitignore && echo git merge").is_empty());
        assert!(git_invocations("ls -la").is_empty());
        assert!(git_invocations("").is_empty());
    }

    #[test]
    fn test_git_by_path_and_wrapper() {
        let found = git_invocations("sudo /usr/bin/git push -f");
        assert_eq!(found.len(), 1);
        assert!(found[0].is("push"));
        assert!(found[0].has_short('f'));
    }

    #[test]
    fn test_wrapper_options_are_skipped() {
        for command in [
            "sudo -u dev git merge dev",
            "sudo -E -u dev -- git merge dev",
            "env -i git merge dev",
            "env -u HOME GIT_DIR=x git merge dev",
            "nohup time -p git merge dev",
        ] {
            let found = git_invocations(command);
            assert_eq!(found.len(), 1, "{command}");
            assert!(found[0].is("merge"), "{command}");
            assert_eq!(found[0].args, words(&["dev"]), "{command}");
        }
        assert!(git_invocations("sudo -u git ls").is_empty());
    }

    #[test]
    fn test_git_without_subcommand() {
        let found = git_invocations("git --version");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subcommand, "");
    }

    #[test]
    fn test_options_stop_at_double_dash() {
        let invocation = GitInvocation {
            subcommand: "checkout".to_string(),
            args: words(&["main", "--", "-b"]),
        };
        assert!(!invocation.has_short('b'));
    }

    #[test]
    fn test_has_long_with_value() {
        let invocation = GitInvocation {
            subcommand: "push".to_string(),
            args: words(&["--force-with-lease=main", "--follow-tags"]),
        };
        assert!(invocation.has_long("--force-with-lease"));
        assert!(!invocation.has_long("--force"));
        assert!(!invocation.has_long("--follow"));
    }
}

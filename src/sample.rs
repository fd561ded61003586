//! A small bundled cheatsheet used by the CLI `sample` command and in tests.

use crate::model::{Entry, Group, Section};

/// Builds a three-group cheatsheet covering JavaScript, Rust and Git basics.
pub fn sample_cheatsheet() -> Vec<Group> {
    vec![javascript(), rust(), git()]
}

fn javascript() -> Group {
    Group::new("JavaScript")
        .with_intro("Core syntax and everyday idioms of modern JavaScript.")
        .with_section(
            Section::new("Variables")
                .with_item(
                    Entry::new("let")
                        .with_description("Declares a block-scoped variable that can be reassigned.")
                        .with_code("let count = 0;\ncount += 1;"),
                )
                .with_item(
                    Entry::new("const")
                        .with_description("Declares a block-scoped, immutable binding.")
                        .with_note(Some(
                            "The binding cannot be reassigned, but objects it points to stay mutable."
                                .to_string(),
                        ))
                        .with_code("const user = { name: \"Ada\" };\nuser.name = \"Grace\"; // allowed"),
                ),
        )
        .with_section(
            Section::new("Functions")
                .with_item(
                    Entry::new("Arrow functions")
                        .with_description(
                            "Concise function expressions that capture `this` from the enclosing scope.",
                        )
                        .with_code("const double = (n) => n * 2;\n[1, 2, 3].map(double); // [2, 4, 6]"),
                )
                .with_item(
                    Entry::new("Default parameters")
                        .with_description("Parameters fall back to a default when the argument is undefined.")
                        .with_code("function greet(name = \"world\") {\n  return `Hello, ${name}!`;\n}"),
                ),
        )
        .with_section(
            Section::new("Async")
                .with_item(
                    Entry::new("async / await")
                        .with_description("Write promise-based code that reads top to bottom.")
                        .with_note(Some("Wrap awaits in try/catch to handle rejections.".to_string()))
                        .with_code(
                            "async function load(url) {\n  try {\n    const res = await fetch(url);\n    return await res.json();\n  } catch (err) {\n    console.error(err);\n  }\n}",
                        ),
                ),
        )
}

fn rust() -> Group {
    Group::new("Rust")
        .with_intro("Ownership, borrowing and error handling at a glance.")
        .with_section(
            Section::new("Ownership")
                .with_item(
                    Entry::new("Move semantics")
                        .with_description("Assigning a non-Copy value moves it; the source can no longer be used.")
                        .with_code("let a = String::from(\"hi\");\nlet b = a;\n// println!(\"{a}\"); // error: value moved"),
                )
                .with_item(
                    Entry::new("Borrowing")
                        .with_description("Any number of shared references, or exactly one mutable reference.")
                        .with_code("fn len(s: &str) -> usize {\n    s.len()\n}"),
                ),
        )
        .with_section(
            Section::new("Errors").with_item(
                Entry::new("The ? operator")
                    .with_description("Returns early with the error of a failed Result, converting it with From.")
                    .with_note(Some("Only usable in functions that return Result or Option.".to_string()))
                    .with_code(
                        "fn read(path: &Path) -> io::Result<String> {\n    let text = fs::read_to_string(path)?;\n    Ok(text.trim().to_owned())\n}",
                    ),
            ),
        )
}

fn git() -> Group {
    Group::new("Git")
        .with_intro("Commands for the daily branch-commit-push loop.")
        .with_section(
            Section::new("Branches")
                .with_item(
                    Entry::new("Create and switch")
                        .with_description("Start a new branch from the current commit and check it out.")
                        .with_code("git switch -c feature/login"),
                )
                .with_item(
                    Entry::new("Rebase onto main")
                        .with_description("Replay local commits on top of the latest main.")
                        .with_note(Some("Never rebase commits that others have already pulled.".to_string()))
                        .with_code("git fetch origin\ngit rebase origin/main"),
                ),
        )
        .with_section(
            Section::new("Undo").with_item(
                Entry::new("Amend")
                    .with_description("Fold staged changes into the last commit and edit its message.")
                    .with_code("git add -p\ngit commit --amend"),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_content_in_every_group() {
        let groups = sample_cheatsheet();
        assert_eq!(groups.len(), 3);
        assert!(groups
            .iter()
            .all(|group| group.sections().iter().any(|s| !s.items().is_empty())));
    }
}

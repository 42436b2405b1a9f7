//! Shared integration-test harness: scaffolds a site in a temporary
//! directory and runs the `codewalk` binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Minimal configuration written by [`TestSite::new`].
pub const DEFAULT_CONFIG: &str = "site:\n  title: Test Site\n";

/// A post with one two-step walkthrough.
pub const WALKTHROUGH_POST: &str = r#"# Build a store

Some intro prose.

::: walkthrough

First we create the store.

```js store.js
const store = {}
```

---

Then we add dispatch.

```js store.js focus=2
const store = {}
store.dispatch = () => {}
```

:::

Closing prose.
"#;

/// A post whose walkthrough never closes.
pub const BROKEN_POST: &str = "# Broken\n\n::: walkthrough\n\n```js\nlet a = 1\n```\n";

/// A site directory scaffolded in a temp dir.
///
/// Commands run with the site root as working directory, so the default
/// `codewalk.yaml` configuration path resolves.
pub struct TestSite {
    dir: tempfile::TempDir,
}

impl TestSite {
    /// Creates a site with the minimal config and an empty `posts/`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("posts")).expect("create posts dir");
        std::fs::write(dir.path().join("codewalk.yaml"), DEFAULT_CONFIG).expect("write config");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> PathBuf {
        self.dir.path().join("codewalk.yaml")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("dist")
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config(), yaml).expect("write config");
    }

    pub fn write_post(&self, slug: &str, body: &str) {
        let path = self.dir.path().join("posts").join(format!("{slug}.mdx"));
        std::fs::write(path, body).expect("write post");
    }

    pub fn write_public(&self, rel: &str, body: &str) {
        let dest = self.dir.path().join("public").join(rel);
        std::fs::create_dir_all(dest.parent().expect("public parent")).expect("create public dirs");
        std::fs::write(dest, body).expect("write public file");
    }

    /// Command for the binary with the site root as working directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(codewalk_bin());
        cmd.args(args).current_dir(self.dir.path());
        cmd
    }

    /// Runs the binary to completion.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("failed to run codewalk")
    }

    pub fn read_output(&self, rel: &str) -> String {
        std::fs::read_to_string(self.output().join(rel)).expect("read output file")
    }
}

/// Path to the compiled `codewalk` binary.
pub fn codewalk_bin() -> &'static str {
    env!("CARGO_BIN_EXE_codewalk")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

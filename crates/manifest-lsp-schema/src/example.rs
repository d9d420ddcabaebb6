//! Bundled example manifest the key schema is generated from.
//!
//! Follows the manifest format reference at https://doc.rust-lang.org/cargo/reference/manifest.html;
//! only table and key names matter here, values are placeholders.

pub(crate) const EXAMPLE_MANIFEST: &str = r#"
[package]
name = "hello_world"
version = "0.1.0"
authors = ["you@example.com"]
build = "build.rs"
documentation = "https://docs.rs/example"
exclude = ["build/**/*.o", "doc/**/*.html"]
include = ["src/**/*", "Cargo.toml"]
publish = false
workspace = "path/to/workspace/root"
edition = "2021"
rust-version = "1.56"

links = "..."
default-run = "..."
autobins = false
autoexamples = false
autotests = false
autobenches = false
resolver = "..."

description = "..."
homepage = "..."
repository = "..."
readme = "..."
keywords = ["...", "..."]
categories = ["...", "..."]
license = "..."
license-file = "..."

[badges]
appveyor = { repository = "...", branch = "master", service = "github" }
circle-ci = { repository = "...", branch = "master" }
gitlab = { repository = "...", branch = "master" }
travis-ci = { repository = "...", branch = "master" }
codecov = { repository = "...", branch = "master", service = "github" }
coveralls = { repository = "...", branch = "master", service = "github" }
is-it-maintained-issue-resolution = { repository = "..." }
is-it-maintained-open-issues = { repository = "..." }
maintenance = { status = "..." }

[profile.release]
opt-level = 3
debug = false
split-debuginfo = "..."
strip = "none"
rpath = false
lto = false
debug-assertions = false
codegen-units = 1
panic = 'unwind'
incremental = true
overflow-checks = true

[features]
default = ["jquery", "uglifier", "session"]

[workspace]
members = ["path/to/member1", "path/to/member2", "path/to/member3/*"]
exclude = ["path1", "path/to/dir2"]
default-members = ["path/to/member2", "path/to/member3/foo"]

[dependencies]
foo = { git = 'https://github.com/example/foo' }

[dev-dependencies]
tempdir = "0.3"

[build-dependencies]
gcc = "0.3"

[lib]
name = "foo"
path = "src/lib.rs"
crate-type = ["dylib", "staticlib", "cdylib", "rlib"]
test = true
doctest = true
bench = true
doc = true
plugin = false
proc-macro = false
harness = true
edition = "2021"

[[example]]
name = "foo"
path = "src/lib.rs"
test = true
doctest = true
bench = true
doc = true
plugin = false
harness = true
required-features = ["postgres", "tools"]
edition = "2021"

[[bin]]
name = "foo"
path = "src/lib.rs"
test = true
doctest = true
bench = true
doc = true
plugin = false
harness = true
required-features = ["postgres", "tools"]
edition = "2021"

[[test]]
name = "foo"
path = "src/lib.rs"
test = true
doctest = true
bench = true
doc = true
plugin = false
harness = true
required-features = ["postgres", "tools"]
edition = "2021"

[[bench]]
name = "foo"
path = "src/lib.rs"
test = true
doctest = true
bench = true
doc = true
plugin = false
harness = true
required-features = ["postgres", "tools"]
edition = "2021"

[patch.crates-io]
foo = { git = 'https://github.com/example/foo' }
"#;

// Source files with known findings and their fixed forms
// WHY: Golden-file testing requires deterministic input/output pairs for validation

pub const JS_SOURCE: &str = r#"// Connect to the master database
const replicaHost = "slave-01";
function verify(list) {
  return list.includes("ok");
}
"#;

pub const JS_FIXED: &str = r#"// Connect to the primary database
const replicaHost = "secondary-01";
function verify(list) {
  return list.includes("ok");
}
"#;

pub const CSS_SOURCE: &str = "/* Grandfathered rules for the legacy theme */\n.legacy { color: red; }\n";

pub const CSS_FIXED: &str = "/* Legacy rules for the legacy theme */\n.legacy { color: red; }\n";

pub const MD_SOURCE: &str = "# Setup\n\nAdd hosts to our whitelist.\n\n```sh\ngit checkout master\n```\n";

pub const MD_FIXED: &str = "# Setup\n\nAdd hosts to our allowlist.\n\n```sh\ngit checkout master\n```\n";

pub const HTML_SOURCE: &str = r#"<!DOCTYPE html>
<html><body>
<h1>Welcome</h1>
<p>Watch your blind spot.</p>
<script>const master = 1;</script>
</body></html>
"#;

pub const HTML_FIXED: &str = r#"<!DOCTYPE html>
<html><body>
<h1>Welcome</h1>
<p>Watch your gap.</p>
<script>const master = 1;</script>
</body></html>
"#;

/// Text with no dictionary term in any form
pub const CLEAN_MD: &str = "# Notes\n\nAll good.\n";

//! Template file contents

/// Name under which the manifest template is looked up
pub const PACKAGE_JSON_TEMPLATE: &str = "package.json.tpl";

/// Built-in `package.json` template
pub const PACKAGE_JSON_TPL: &str = include_str!("../../templates/package.json.tpl");

/// Placeholder replaced with the project name
pub const PACKAGE_NAME_TOKEN: &str = "#package_name#";

/// Placeholder replaced with the start script
pub const START_SCRIPT_TOKEN: &str = "#start_script#";

/// `.babelrc` for new projects
pub const BABELRC: &str = r#"{
  "presets": [
    "@babel/preset-env"
  ]
}
"#;

/// `.eslintrc.js` for new projects
pub const ESLINTRC: &str = r"module.exports = {
  env: {
    browser: true,
    commonjs: true,
    es6: true,
  },
  extends: [
    'airbnb-base',
  ],
  globals: {
    Atomics: 'readonly',
    SharedArrayBuffer: 'readonly',
  },
  parserOptions: {
    ecmaVersion: 2018,
  },
  rules: {
  },
};
";

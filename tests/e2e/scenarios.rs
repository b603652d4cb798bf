use std::path::Path;

use super::harness::{TestContext, TestEnv, parse_json, titles, write_file};

pub struct Scenario {
    pub name: &'static str,
    pub run: fn(&TestContext) -> Result<(), String>,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "help_output",
            run: scenario_help,
        },
        Scenario {
            name: "no_args_error",
            run: scenario_no_args,
        },
        Scenario {
            name: "list_empty_bundle",
            run: scenario_list_empty_bundle,
        },
        Scenario {
            name: "list_missing_bundle",
            run: scenario_list_missing_bundle,
        },
        Scenario {
            name: "list_merged_sources",
            run: scenario_list_merged_sources,
        },
        Scenario {
            name: "list_text_output",
            run: scenario_list_text_output,
        },
        Scenario {
            name: "list_legacy_plist_name",
            run: scenario_list_legacy_plist_name,
        },
        Scenario {
            name: "list_named_plist",
            run: scenario_list_named_plist,
        },
        Scenario {
            name: "list_xcode_package_resolved",
            run: scenario_list_xcode_package_resolved,
        },
        Scenario {
            name: "list_config_overrides",
            run: scenario_list_config_overrides,
        },
        Scenario {
            name: "list_invalid_config",
            run: scenario_list_invalid_config,
        },
        Scenario {
            name: "list_malformed_source_is_skipped",
            run: scenario_list_malformed_source_is_skipped,
        },
        Scenario {
            name: "show_license_text",
            run: scenario_show_license_text,
        },
        Scenario {
            name: "show_repository_without_text",
            run: scenario_show_repository_without_text,
        },
        Scenario {
            name: "show_unknown_title",
            run: scenario_show_unknown_title,
        },
        Scenario {
            name: "decode_package_v1",
            run: scenario_decode_package_v1,
        },
        Scenario {
            name: "decode_settings_plist",
            run: scenario_decode_settings_plist,
        },
        Scenario {
            name: "decode_malformed",
            run: scenario_decode_malformed,
        },
        Scenario {
            name: "decode_missing_file",
            run: scenario_decode_missing_file,
        },
    ]
}

// =============================================================================
// Fixtures
// =============================================================================

const HEADER: &str = "This application makes use of the following third party libraries:";
const FOOTER: &str = "Generated by CocoaPods - https://cocoapods.org";

const PACKAGE_RESOLVED_V2: &str = r#"{
  "pins" : [
    {
      "identity" : "swift-log",
      "kind" : "remoteSourceControl",
      "location" : "https://github.com/apple/swift-log.git",
      "state" : {
        "revision" : "173f567a2dfec11d74588eea82cecea555bdc0bc",
        "version" : "1.4.0"
      }
    }
  ],
  "version" : 2
}"#;

const PACKAGE_RESOLVED_V1: &str = r#"{
  "object": {
    "pins": [
      {
        "package": "Alamofire",
        "repositoryURL": "https://github.com/Alamofire/Alamofire.git",
        "state": { "branch": null, "revision": "f96b619", "version": "5.4.3" }
      },
      {
        "package": "SnapKit",
        "repositoryURL": "https://github.com/SnapKit/SnapKit",
        "state": { "branch": null, "revision": "d458564", "version": "5.0.1" }
      }
    ]
  },
  "version": 1
}"#;

/// One settings-bundle row: (title, footer text, license).
type Row<'a> = (&'a str, &'a str, Option<&'a str>);

fn settings_plist(rows: &[Row]) -> String {
    let mut specifiers = String::new();
    for (title, text, license) in rows {
        specifiers.push_str("    <dict>\n");
        specifiers.push_str(&format!(
            "      <key>FooterText</key>\n      <string>{}</string>\n",
            text
        ));
        if let Some(license) = license {
            specifiers.push_str(&format!(
                "      <key>License</key>\n      <string>{}</string>\n",
                license
            ));
        }
        specifiers.push_str(&format!(
            "      <key>Title</key>\n      <string>{}</string>\n",
            title
        ));
        specifiers.push_str("      <key>Type</key>\n      <string>PSGroupSpecifier</string>\n");
        specifiers.push_str("    </dict>\n");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>PreferenceSpecifiers</key>
  <array>
{}  </array>
  <key>StringsTable</key>
  <string>Acknowledgements</string>
  <key>Title</key>
  <string>Acknowledgements</string>
</dict>
</plist>
"#,
        specifiers
    )
}

fn cocoapods_plist() -> String {
    settings_plist(&[
        ("Acknowledgements", HEADER, None),
        (
            "zlib",
            "This software is provided 'as-is',\nwithout any express or implied warranty.",
            Some("zlib"),
        ),
        (
            "Alamofire",
            "Copyright (c) 2014-2021 Alamofire Software Foundation",
            Some("MIT"),
        ),
        ("", FOOTER, None),
    ])
}

fn write_info_plist(dir: &Path, bundle_name: &str) -> Result<(), String> {
    write_file(
        &dir.join("Info.plist"),
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
  <key>CFBundleName</key>
  <string>{}</string>
</dict>
</plist>
"#,
            bundle_name
        ),
    )
}

/// A bundle named "Demo" with both CocoaPods and SwiftPM sources.
fn write_demo_bundle(env: &TestEnv) -> Result<(), String> {
    write_info_plist(&env.root, "Demo")?;
    write_file(
        &env.root.join("Pods-Demo-acknowledgements.plist"),
        &cocoapods_plist(),
    )?;
    write_file(&env.root.join("Package.resolved"), PACKAGE_RESOLVED_V2)
}

// =============================================================================
// General scenarios
// =============================================================================

fn scenario_help(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("help")?;
    let output = ctx.run_acknowlist(&env, &["--help"], &env.root)?;
    output.assert_success()?;
    output.assert_stdout_contains("acknowledgements")?;
    output.assert_stdout_contains("decode")?;
    Ok(())
}

fn scenario_no_args(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("no-args")?;
    let output = ctx.run_acknowlist(&env, &[], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("No command specified")?;
    Ok(())
}

// =============================================================================
// List scenarios
// =============================================================================

fn scenario_list_empty_bundle(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-empty")?;
    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    output.assert_stderr_contains("No acknowledgements found")?;

    let value = parse_json(&output.stdout)?;
    if !titles(&value)?.is_empty() {
        return Err("Expected empty acknowledgements array".to_string());
    }
    if !value["header_text"].is_null() || !value["footer_text"].is_null() {
        return Err(format!("Expected no header or footer, got: {}", value));
    }
    Ok(())
}

fn scenario_list_missing_bundle(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-missing")?;
    let output = ctx.run_acknowlist(&env, &["list", "--bundle", "Nowhere"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("Bundle directory not found")?;
    Ok(())
}

fn scenario_list_merged_sources(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-merged")?;
    write_demo_bundle(&env)?;

    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;

    let titles = titles(&value)?;
    if titles != ["Alamofire", "swift-log", "zlib"] {
        return Err(format!("Unexpected titles: {:?}", titles));
    }

    // Stock CocoaPods header is dropped, stock footer is localized.
    if !value["header_text"].is_null() {
        return Err(format!("Expected no header, got: {}", value["header_text"]));
    }
    if value["footer_text"] != "Generated by CocoaPods" {
        return Err(format!("Unexpected footer: {}", value["footer_text"]));
    }
    if value.get("footer_link").is_some() {
        return Err(format!("Localized footer has no link: {}", value["footer_link"]));
    }

    let entries = &value["acknowledgements"];
    if entries[0]["license"] != "MIT" {
        return Err(format!("Expected MIT license, got: {}", entries[0]));
    }
    if entries[1]["repository"] != "https://github.com/apple/swift-log.git" {
        return Err(format!("Expected repository URL, got: {}", entries[1]));
    }
    if entries[1].get("text").is_some() {
        return Err(format!("Manifest entries have no text, got: {}", entries[1]));
    }
    if entries[2]["text"]
        != "This software is provided 'as-is', without any express or implied warranty."
    {
        return Err(format!("Line break was not filtered: {}", entries[2]["text"]));
    }
    Ok(())
}

fn scenario_list_text_output(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-text")?;
    write_demo_bundle(&env)?;

    let output = ctx.run_acknowlist(&env, &["list", "--verbose"], &env.root)?;
    output.assert_success()?;
    output.assert_stderr_contains("Reading acknowledgements from .")?;
    output.assert_stdout_contains("Alamofire [MIT]")?;
    output.assert_stdout_contains("swift-log")?;
    output.assert_stdout_contains("Generated by CocoaPods")?;
    if output.stdout.contains("cocoapods.org") {
        return Err(format!("Stock footer leaked: {}", output.stdout));
    }
    Ok(())
}

fn scenario_list_legacy_plist_name(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-legacy")?;
    write_file(
        &env.root.join("Pods-acknowledgements.plist"),
        &settings_plist(&[
            ("Acknowledgements", "Thanks to everyone below.", None),
            ("Kingfisher", "MIT License", Some("MIT")),
            ("", "", None),
        ]),
    )?;

    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    if titles(&value)? != ["Kingfisher"] {
        return Err(format!("Unexpected list: {}", value));
    }
    if value["header_text"] != "Thanks to everyone below." {
        return Err(format!("Custom header was not kept: {}", value["header_text"]));
    }
    if !value["footer_text"].is_null() {
        return Err(format!("Empty footer should be hidden: {}", value["footer_text"]));
    }
    Ok(())
}

fn scenario_list_named_plist(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-named")?;
    write_demo_bundle(&env)?;
    write_file(
        &env.root.join("Extras.plist"),
        &settings_plist(&[
            ("Acknowledgements", HEADER, None),
            ("Lottie", "Apache License 2.0", Some("Apache-2.0")),
            ("", FOOTER, None),
        ]),
    )?;

    let output = ctx.run_acknowlist(
        &env,
        &["list", "--json", "--plist", "Extras", "--plist", "Missing"],
        &env.root,
    )?;
    output.assert_success()?;
    output.assert_stderr_contains("Missing.plist")?;

    let value = parse_json(&output.stdout)?;
    if titles(&value)? != ["Lottie"] {
        return Err(format!("Only the named plist should load: {}", value));
    }
    Ok(())
}

fn scenario_list_xcode_package_resolved(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-xcode")?;
    write_file(
        &env.root
            .join("Demo.xcodeproj")
            .join("project.xcworkspace")
            .join("xcshareddata")
            .join("swiftpm")
            .join("Package.resolved"),
        PACKAGE_RESOLVED_V1,
    )?;

    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    if titles(&value)? != ["Alamofire", "SnapKit"] {
        return Err(format!("Unexpected list: {}", value));
    }
    Ok(())
}

fn scenario_list_config_overrides(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-config")?;
    write_demo_bundle(&env)?;
    write_file(
        &env.xdg_config.join("acknowlist").join("config.json"),
        r#"{ "header_text": "With thanks to:", "footer_text": "More at example.org/credits" }"#,
    )?;

    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    if value["header_text"] != "With thanks to:" {
        return Err(format!("Header override ignored: {}", value["header_text"]));
    }
    if value["footer_text"] != "More at example.org/credits" {
        return Err(format!("Footer override ignored: {}", value["footer_text"]));
    }
    if value["footer_link"] != "http://example.org/credits" {
        return Err(format!("Unexpected footer link: {}", value["footer_link"]));
    }
    Ok(())
}

fn scenario_list_invalid_config(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-bad-config")?;
    write_file(
        &env.xdg_config.join("acknowlist").join("config.json"),
        "{ not json",
    )?;

    let output = ctx.run_acknowlist(&env, &["list"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to parse config file")?;
    Ok(())
}

fn scenario_list_malformed_source_is_skipped(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("list-malformed")?;
    write_info_plist(&env.root, "Demo")?;
    write_file(&env.root.join("Pods-Demo-acknowledgements.plist"), "garbage")?;
    write_file(&env.root.join("Package.resolved"), PACKAGE_RESOLVED_V2)?;

    let output = ctx.run_acknowlist(&env, &["list", "--json"], &env.root)?;
    output.assert_success()?;
    output.assert_stderr_contains("Failed to decode")?;
    let value = parse_json(&output.stdout)?;
    if titles(&value)? != ["swift-log"] {
        return Err(format!("Expected only the SwiftPM entry: {}", value));
    }
    Ok(())
}

// =============================================================================
// Show scenarios
// =============================================================================

fn scenario_show_license_text(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("show-text")?;
    write_demo_bundle(&env)?;

    let output = ctx.run_acknowlist(&env, &["show", "Alamofire"], &env.root)?;
    output.assert_success()?;
    output.assert_stdout_contains("License: MIT")?;
    output.assert_stdout_contains("Alamofire Software Foundation")?;

    // Entries with text never trigger a fetch.
    let json = ctx.run_acknowlist(&env, &["show", "Alamofire", "--fetch", "--json"], &env.root)?;
    json.assert_success()?;
    let value = parse_json(&json.stdout)?;
    if value["title"] != "Alamofire" || value.get("fetched").is_some() {
        return Err(format!("Unexpected show result: {}", value));
    }
    Ok(())
}

fn scenario_show_repository_without_text(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("show-repo")?;
    write_demo_bundle(&env)?;

    let output = ctx.run_acknowlist(&env, &["show", "swift-log"], &env.root)?;
    output.assert_success()?;
    output.assert_stdout_contains("https://github.com/apple/swift-log.git")?;
    Ok(())
}

fn scenario_show_unknown_title(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("show-unknown")?;
    write_demo_bundle(&env)?;

    let output = ctx.run_acknowlist(&env, &["show", "LeftPad"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("No acknowledgement titled 'LeftPad'")?;
    Ok(())
}

// =============================================================================
// Decode scenarios
// =============================================================================

fn scenario_decode_package_v1(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("decode-v1")?;
    write_file(&env.root.join("Package.resolved"), PACKAGE_RESOLVED_V1)?;

    let output = ctx.run_acknowlist(&env, &["decode", "Package.resolved", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;
    if titles(&value)? != ["Alamofire", "SnapKit"] {
        return Err(format!("Unexpected list: {}", value));
    }
    if value["acknowledgements"][1]["repository"] != "https://github.com/SnapKit/SnapKit" {
        return Err(format!("Repository not kept: {}", value));
    }
    Ok(())
}

fn scenario_decode_settings_plist(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("decode-plist")?;
    write_file(&env.root.join("Settings.plist"), &cocoapods_plist())?;

    let output = ctx.run_acknowlist(&env, &["decode", "Settings.plist", "--json"], &env.root)?;
    output.assert_success()?;
    let value = parse_json(&output.stdout)?;

    // Decoding alone keeps file order and the raw header and footer.
    if titles(&value)? != ["zlib", "Alamofire"] {
        return Err(format!("Unexpected list: {}", value));
    }
    if value["header_text"] != HEADER || value["footer_text"] != FOOTER {
        return Err(format!("Header or footer changed: {}", value));
    }
    if value["footer_link"] != "https://cocoapods.org" {
        return Err(format!("Unexpected footer link: {}", value["footer_link"]));
    }
    Ok(())
}

fn scenario_decode_malformed(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("decode-malformed")?;
    write_file(&env.root.join("Package.resolved"), "{ \"pins\": 42 }")?;

    let output = ctx.run_acknowlist(&env, &["decode", "Package.resolved"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("Malformed Package.resolved input")?;
    Ok(())
}

fn scenario_decode_missing_file(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("decode-missing")?;
    let output = ctx.run_acknowlist(&env, &["decode", "Nope.plist"], &env.root)?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to read")?;
    Ok(())
}

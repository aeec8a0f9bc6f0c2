//! End-to-end harness tests: skeleton → generated harness → recovered tests, for every language.

use kawigi::harness::{extract_harness, generate_harness, insert_harness};
use kawigi::problem::{ClassDecl, MethodDecl, Test};
use kawigi::profile::{JavaProfile, LanguageProfile, ProfileRegistry, PythonProfile, Target};
use kawigi::settings::Settings;
use kawigi::template;
use kawigi_core::DataType;

fn kitchen_sink() -> ClassDecl {
    let method = MethodDecl::new("check", DataType::IntegerArray)
        .param("name", DataType::String)
        .param("count", DataType::Integer)
        .param("ratio", DataType::Double)
        .param("big", DataType::Long)
        .param("flag", DataType::Boolean)
        .param("words", DataType::StringArray)
        .param("nums", DataType::IntegerArray)
        .param("weights", DataType::DoubleArray)
        .param("ids", DataType::LongArray)
        .param("bits", DataType::BooleanArray);
    let mut class = ClassDecl::new("KitchenSink", method);

    class.add_test(Test::new(
        [
            "plain",
            "3",
            "0.5",
            "123456789012",
            "true",
            r#"{"a","b c"}"#,
            "{1,-2,3}",
            "{1.5,-0.25}",
            "{-9000000000,7}",
            "{true,false}",
        ],
        Some("{4,5}"),
    ));

    class.add_test(
        Test::new(
            [
                r#"say "hi" \ ok??!"#,
                "-1",
                "2",
                "0",
                "false",
                r#"{"x\"y","back\\slash","??=","a,b"}"#,
                "{42}",
                "{0.125}",
                "{1}",
                "{false}",
            ],
            None,
        )
        .disabled(true),
    );

    let long_name = format!("{}\"q\"", "ab".repeat(700));
    let long_nums = format!("{{{}}}", (0..400).map(|i| i.to_string()).collect::<Vec<_>>().join(","));
    class.add_test(Test::new(
        [
            long_name.as_str(),
            "0",
            "-1.5",
            "-9000000000",
            "false",
            "{}",
            long_nums.as_str(),
            "{}",
            "{}",
            "{}",
        ],
        Some("{}"),
    ));
    class
}

// ========================================
// Round trip per language
// ========================================

#[test]
fn every_language_round_trips_its_tests() {
    let registry = ProfileRegistry::new();
    let settings = Settings::new();
    let class = kitchen_sink();

    for profile in registry.iter() {
        let target = Target::new(profile, &settings);
        let skeleton = template::skeleton(&class, target).text;
        let generated = insert_harness(&skeleton, &class, target);
        assert_ne!(generated, skeleton, "{}: harness was not inserted", profile.name());

        let mut recovered = ClassDecl::new(class.name.clone(), class.method.clone());
        recovered.add_test(Test::new(["stale"; 10], None));
        let parsed = extract_harness(&generated, &mut recovered, target);

        assert!(parsed.found, "{}: region not found", profile.name());
        assert_eq!(parsed.skipped, 0, "{}: blocks skipped", profile.name());
        assert_eq!(parsed.source, skeleton, "{}: source not restored", profile.name());
        assert_eq!(recovered.tests(), class.tests(), "{}: tests differ", profile.name());
    }
}

#[test]
fn long_values_are_wrapped() {
    let registry = ProfileRegistry::new();
    let settings = Settings::new();
    let class = kitchen_sink();

    for profile in registry.iter() {
        let generated = generate_harness(&class, Target::new(profile, &settings));
        let longest = generated.lines().map(str::len).max().unwrap_or(0);
        assert!(longest < 1100, "{}: line of {longest} chars", profile.name());
    }
}

#[test]
fn settings_changes_between_calls_are_observed() {
    let registry = ProfileRegistry::new();
    let class = kitchen_sink();
    let cpp = registry.by_name("C++").unwrap();

    let custom = Settings::new()
        .with("cpp.long-type", "int64_t")
        .with("cpp.long-literal-suffix", "ll")
        .with("cpp.indent", "2");
    let generated = generate_harness(&class, Target::new(cpp, &custom));
    assert!(generated.contains("int64_t p3 = 0;"));
    assert!(generated.contains("p3 = 123456789012ll;"));
    assert!(generated.contains("\n  cout"));

    let mut recovered = ClassDecl::new(class.name.clone(), class.method.clone());
    let parsed = extract_harness(&generated, &mut recovered, Target::new(cpp, &custom));
    assert_eq!(parsed.skipped, 0);
    assert_eq!(recovered.tests(), class.tests());
}

// ========================================
// Reformatted harnesses
// ========================================

/// Generate the kitchen-sink harness into its skeleton, reformat it with `edit`, and check every test survives.
fn assert_survives_reformatting(edit: impl Fn(&str, &dyn LanguageProfile) -> String, restored: impl Fn(&str) -> String) {
    let registry = ProfileRegistry::new();
    let settings = Settings::new();
    let class = kitchen_sink();

    for profile in registry.iter() {
        let target = Target::new(profile, &settings);
        let skeleton = template::skeleton(&class, target).text;
        let edited = edit(&insert_harness(&skeleton, &class, target), profile);

        let mut recovered = ClassDecl::new(class.name.clone(), class.method.clone());
        let parsed = extract_harness(&edited, &mut recovered, target);

        assert!(parsed.found, "{}: region not found", profile.name());
        assert_eq!(parsed.skipped, 0, "{}: blocks skipped", profile.name());
        assert_eq!(parsed.source, restored(&skeleton), "{}: source not restored", profile.name());
        assert_eq!(recovered.tests(), class.tests(), "{}: tests differ", profile.name());
    }
}

#[test]
fn windows_line_breaks_are_tolerated() {
    assert_survives_reformatting(|generated, _| generated.replace('\n', "\r\n"), |s| s.replace('\n', "\r\n"));
}

#[test]
fn reindented_driver_is_tolerated() {
    assert_survives_reformatting(|generated, _| generated.replace('\t', "    "), |s| s.replace('\t', "    "));
}

#[test]
fn array_literal_split_across_lines_is_tolerated() {
    assert_survives_reformatting(
        |generated, profile| {
            let block = generated.find("----- test 0 -----").unwrap();
            let assign = block + generated[block..].find("p6 = ").unwrap();
            let comma = assign + generated[assign..].find(", ").unwrap();
            let cont = match profile.continuation() {
                "" => String::new(),
                cont => format!(" {cont}"),
            };
            format!("{},{cont}\n          {}", &generated[..comma], &generated[comma + 2..])
        },
        str::to_string,
    );
}

#[test]
fn code_sharing_the_tag_line_is_kept() {
    let registry = ProfileRegistry::new();
    let settings = Settings::new();
    let mut class = echo();
    class.add_test(Test::new(["hi"], Some("hi")));

    for profile in registry.iter() {
        let target = Target::new(profile, &settings);
        let generated = insert_harness("head\n\t<%:testing-code%> trailer\n", &class, target);

        let mut recovered = echo();
        let parsed = extract_harness(&generated, &mut recovered, target);
        assert_eq!(parsed.source, "head\n\t<%:testing-code%>\n\ttrailer\n", "{}", profile.name());
        assert_eq!(recovered.tests(), class.tests(), "{}", profile.name());
    }
}

// ========================================
// Driver semantics
// ========================================

fn echo() -> ClassDecl {
    ClassDecl::new("Echo", MethodDecl::new("echo", DataType::String).param("s", DataType::String))
}

#[test]
fn all_disabled_driver_folds_disabled_into_success() {
    let settings = Settings::new();
    let mut class = echo();
    class.add_test(Test::new(["hi"], Some("hi")).disabled(true));
    class.add_test(Test::new(["yo"], None).disabled(true));

    let java = generate_harness(&class, Target::new(&JavaProfile, &settings));
    assert!(java.contains("all_right = (disabled || KawigiEdit_RunTest(0, p0, true, p1) ) && all_right;"));
    assert!(java.contains("all_right = (disabled || KawigiEdit_RunTest(1, p0, false, p1) ) && all_right;"));
    assert!(java.contains("tests_disabled = tests_disabled || disabled;"));
    assert!(java.contains("You're a stud (but some test cases were disabled)!"));

    let python = generate_harness(&class, Target::new(&PythonProfile, &settings));
    assert!(python.contains("all_right = (disabled or KawigiEdit_RunTest(0, p0, True, p1) ) and all_right"));
}

#[test]
fn malformed_blocks_are_skipped_and_counted() {
    let settings = Settings::new();
    let target = Target::new(&JavaProfile, &settings);
    let mut class = echo();
    class.add_test(Test::new(["hi"], Some("hi")));
    class.add_test(Test::new(["yo"], Some("yo")));

    let source = "public class Echo {\n\t<%:testing-code%>\n}\n";
    let generated = insert_harness(source, &class, target);
    let damaged = generated.replacen("p0 = \"hi\";", "", 1);

    let mut recovered = echo();
    let parsed = extract_harness(&damaged, &mut recovered, target);
    assert!(parsed.found);
    assert_eq!(parsed.skipped, 1);
    assert_eq!(recovered.tests(), &[Test::new(["yo"], Some("yo"))]);
}

#[test]
fn hand_edited_values_are_picked_up() {
    let settings = Settings::new();
    let target = Target::new(&JavaProfile, &settings);
    let mut class = echo();
    class.add_test(Test::new(["hi"], Some("hi")));

    let source = "public class Echo {\n\t<%:testing-code%>\n}\n";
    let generated = insert_harness(source, &class, target);
    let edited = generated
        .replacen("p0 = \"hi\";", "p0   =   \"hello\" +\n\t\t\t\" there\"  ;", 1)
        .replacen("\tdisabled = false;", "\tdisabled = true;", 1);

    let mut recovered = echo();
    extract_harness(&edited, &mut recovered, target);
    assert_eq!(recovered.tests(), &[Test::new(["hello there"], Some("hi")).disabled(true)]);
}

#[test]
fn source_without_region_is_untouched() {
    let settings = Settings::new();
    let mut class = echo();
    class.add_test(Test::new(["keep"], None));

    let parsed = extract_harness("class Echo {}\n", &mut class, Target::new(&JavaProfile, &settings));
    assert!(!parsed.found);
    assert_eq!(parsed.source, "class Echo {}\n");
    assert_eq!(class.test_count(), 1);
}

use std::fs;

use pretty_assertions::assert_eq;

use crate::{assert_success, drawing_image_keys, img_titles, CliTest, SQUARE_SVG};

#[test]
fn single_file_mode_writes_xaml_and_preview() {
    let test = CliTest::with_two_svgs();

    let output = test.build_dictionary(&["-i", "svgs", "-o", "icons"]);
    assert_success(&output);

    let xaml = test.read_file("svgs/icons.xaml");
    assert_eq!(drawing_image_keys(&xaml), vec!["aDrawingImage", "bDrawingImage"]);
    assert!(xaml.contains(r##"Brush="#FF336699""##));
    assert!(xaml.contains(r#"Thickness="2""#));

    let html = test.read_file("svgs/icons.html");
    assert_eq!(img_titles(&html), vec!["a", "b"]);
    assert!(html.contains(&format!(r#"src="{}""#, test.path("svgs/a.svg").display())));
    assert!(html.contains(r#"height="128""#));
}

#[test]
fn dictionary_mode_writes_entries_and_wrapper() {
    let test = CliTest::with_two_svgs();

    let output = test.build_dictionary(&["-i", "svgs", "-o", "icons.xaml", "--create-resource-dictionary"]);
    assert_success(&output);

    assert_eq!(drawing_image_keys(&test.read_file("svgs/icons/a.xaml")), vec!["aDrawingImage"]);
    assert_eq!(drawing_image_keys(&test.read_file("svgs/icons/b.xaml")), vec!["bDrawingImage"]);

    let wrapper = test.read_file("svgs/icons.xaml");
    assert!(wrapper.contains(r#"Source="icons/a.xaml""#));
    assert!(wrapper.contains(r#"Source="icons/b.xaml""#));
    assert_eq!(img_titles(&test.read_file("svgs/icons.html")), vec!["a", "b"]);
}

#[test]
fn html_file_can_be_disabled_in_both_modes() {
    for extra in [&[][..], &["--create-resource-dictionary"][..]] {
        let test = CliTest::with_two_svgs();
        let mut args = vec!["-i", "svgs", "-o", "icons", "--build-html-file", "false"];
        args.extend_from_slice(extra);

        assert_success(&test.build_dictionary(&args));
        assert!(test.path("svgs/icons.xaml").exists());
        assert!(!test.path("svgs/icons.html").exists());
    }
}

#[test]
fn output_dir_receives_all_artifacts() {
    let test = CliTest::with_two_svgs();
    fs::create_dir(test.path("out")).unwrap();

    assert_success(&test.build_dictionary(&["-i", "svgs", "-o", "icons", "--output-dir", "out"]));

    assert!(test.path("out/icons.xaml").exists());
    assert!(test.path("out/icons.html").exists());
    assert!(!test.path("svgs/icons.xaml").exists());
}

#[test]
fn missing_output_dir_fails() {
    let test = CliTest::with_two_svgs();
    let output = test.build_dictionary(&["-i", "svgs", "-o", "icons", "--output-dir", "nowhere"]);
    assert!(!output.status.success());
}

#[test]
fn missing_input_dir_fails() {
    let test = CliTest::new();
    let output = test.build_dictionary(&["-i", "svgs", "-o", "icons"]);
    assert!(!output.status.success());
}

#[test]
fn sub_folders_only_with_flag() {
    let test = CliTest::with_two_svgs();
    test.write_file("svgs/nested/c.svg", SQUARE_SVG);

    assert_success(&test.build_dictionary(&["-i", "svgs", "-o", "flat"]));
    assert_eq!(drawing_image_keys(&test.read_file("svgs/flat.xaml")).len(), 2);
    assert_eq!(img_titles(&test.read_file("svgs/flat.html")).len(), 2);

    assert_success(&test.build_dictionary(&["-i", "svgs", "-o", "deep", "--handle-sub-folders"]));
    assert_eq!(
        drawing_image_keys(&test.read_file("svgs/deep.xaml")),
        vec!["aDrawingImage", "bDrawingImage", "cDrawingImage"]
    );
    assert_eq!(img_titles(&test.read_file("svgs/deep.html")), vec!["a", "b", "c"]);
}

#[test]
fn duplicate_entry_names_fail_unless_overwrite() {
    let test = CliTest::new();
    test.write_file("svgs/x.svg", SQUARE_SVG);
    test.write_file("svgs/more/x.svg", SQUARE_SVG);
    let base = ["-i", "svgs", "-o", "icons", "--create-resource-dictionary", "--handle-sub-folders"];

    let output = test.build_dictionary(&base);
    assert!(!output.status.success());
    assert!(!test.path("svgs/icons").exists());

    let mut args = base.to_vec();
    args.extend_from_slice(&["--on-duplicate", "overwrite"]);
    assert_success(&test.build_dictionary(&args));
    assert!(test.path("svgs/icons/x.xaml").exists());
}

#[test]
fn malformed_svg_aborts_without_output() {
    let test = CliTest::new();
    test.write_file("svgs/broken.svg", "<svg><g></svg>");

    let output = test.build_dictionary(&["-i", "svgs", "-o", "icons"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.svg"));
    assert!(!test.path("svgs/icons.xaml").exists());
}

#[test]
fn prefix_postfix_and_component_keys() {
    let test = CliTest::new();
    test.write_file("svgs/home.svg", SQUARE_SVG);

    assert_success(&test.build_dictionary(&[
        "-i", "svgs", "-o", "Icons", "--name-prefix", "app", "--postfix", "Big",
        "--use-component-res-keys", "--comp-res-key-ns", "My.App", "--comp-res-key-ns-name", "res",
        "--create-resource-dictionary",
    ]));

    let xaml = test.read_file("svgs/Icons/home.xaml");
    assert_eq!(
        drawing_image_keys(&xaml),
        vec!["{ComponentResourceKey TypeInTargetAssembly={x:Type res:Icons}, ResourceId=app_homeDrawingImageBig}"]
    );
    assert!(xaml.contains(r#"xmlns:res="clr-namespace:My.App""#));
}

#[test]
fn filter_pixels_per_dip_keeps_output_well_formed() {
    for extra in [&[][..], &["--create-resource-dictionary"][..]] {
        let test = CliTest::with_two_svgs();
        let mut args = vec!["-i", "svgs", "-o", "icons", "--filter-pixels-per-dip"];
        args.extend_from_slice(extra);

        assert_success(&test.build_dictionary(&args));
        let xaml = test.read_file("svgs/icons.xaml");
        assert!(!xaml.contains("PixelsPerDip"));
        roxmltree::Document::parse(&xaml).expect("filtered xaml is well-formed");
    }

    let test = CliTest::with_two_svgs();
    assert_success(&test.build_dictionary(&["-i", "svgs", "-o", "icons", "--filter-pixels-per-dip"]));
    assert_eq!(drawing_image_keys(&test.read_file("svgs/icons.xaml")), vec!["aDrawingImage", "bDrawingImage"]);
}

#[test]
fn malformed_namespace_prefix_is_rejected() {
    let test = CliTest::with_two_svgs();
    let output = test.build_dictionary(&[
        "-i", "svgs", "-o", "icons", "--use-component-res-keys",
        "--comp-res-key-ns", "My.App", "--comp-res-key-ns-name", "a b",
    ]);
    assert!(!output.status.success());
    assert!(!test.path("svgs/icons.xaml").exists());
}

#[test]
fn entry_names_differing_only_in_case_are_duplicates() {
    let test = CliTest::new();
    test.write_file("svgs/Home.svg", SQUARE_SVG);
    test.write_file("svgs/sub/home.svg", SQUARE_SVG);

    let output = test.build_dictionary(&[
        "-i", "svgs", "-o", "icons", "--create-resource-dictionary", "--handle-sub-folders",
    ]);
    assert!(!output.status.success());
    assert!(!test.path("svgs/icons").exists());
}

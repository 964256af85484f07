//! Name matching on delete: keyword mode's substring hazard and the opt-in
//! alternatives.

mod fixtures;

use fixtures::HostProject;
use plugkit_scaffold::{
    Completion, DirectoryMatch, EntryStyle, ModuleName, RegistryKind, ScaffoldConfig, StepStatus,
};
use std::fs;
use strum::IntoEnumIterator;

fn name(s: &str) -> ModuleName {
    ModuleName::new(s).unwrap()
}

fn tagged() -> ScaffoldConfig {
    ScaffoldConfig { entry_style: EntryStyle::Tagged, ..ScaffoldConfig::default() }
}

#[test]
fn test_keyword_delete_also_drops_lines_of_longer_names() {
    let project = HostProject::new();
    let controller = project.controller();
    controller.create(&name("PingPongDelay")).unwrap();

    let outcome = controller.delete(&name("Delay")).unwrap();

    for kind in RegistryKind::iter() {
        assert_eq!(project.lines_containing(kind, "PingPongDelay"), 0, "{kind}");
    }
    // The directory itself is matched exactly and survives.
    assert!(project.path("PingPongDelay").is_dir());
    assert_eq!(outcome.steps_with(StepStatus::NotFound).count(), 1);
    assert_eq!(outcome.completion(), Completion::Partial);
}

#[test]
fn test_keyword_delete_leaves_unrelated_modules_alone() {
    let project = HostProject::new();
    let controller = project.controller();
    controller.create(&name("Gain")).unwrap();
    let with_gain = project.snapshot();

    controller.delete(&name("Chorus")).unwrap();

    assert_eq!(project.snapshot(), with_gain);
    assert!(project.path("Gain").is_dir());
}

#[test]
fn test_tagged_delete_matches_exact_module_only() {
    let project = HostProject::new();
    let controller = project.controller_with(tagged());
    controller.create(&name("PingPongDelay")).unwrap();
    let only_ping_pong = project.snapshot();
    controller.create(&name("Delay")).unwrap();

    let outcome = controller.delete(&name("Delay")).unwrap();

    assert_eq!(outcome.completion(), Completion::Success);
    assert_eq!(project.snapshot(), only_ping_pong);
    assert!(project.path("PingPongDelay").is_dir());
    assert!(!project.path("Delay").exists());
}

#[test]
fn test_tagged_lines_carry_comment_tags() {
    let project = HostProject::new();
    project.controller_with(tagged()).create(&name("Gain")).unwrap();

    assert!(project
        .registry(RegistryKind::AggregateManifest)
        .ends_with("add_subdirectory(Gain) # plugkit:Gain\n"));
    assert!(project
        .registry(RegistryKind::IncludeList)
        .ends_with("#include \"Gain/PluginProcessor.h\" // plugkit:Gain\n"));
    assert!(project.registry(RegistryKind::LinkList).ends_with("\tGain # plugkit:Gain\n)"));
}

#[test]
fn test_tagged_delete_ignores_hand_written_lines() {
    let project = HostProject::new();
    let controller = project.controller_with(tagged());
    controller.create(&name("Gain")).unwrap();
    let manifest = project.registry_path(RegistryKind::AggregateManifest);
    let mut text = fs::read_to_string(&manifest).unwrap();
    text.push_str("# Gain settings live in Gain/CMakeLists.txt\n");
    fs::write(&manifest, &text).unwrap();

    controller.delete(&name("Gain")).unwrap();

    assert_eq!(project.lines_containing(RegistryKind::AggregateManifest, "Gain"), 1);
}

#[test]
fn test_substring_directory_match_removes_first_candidate() {
    let project = HostProject::new();
    let controller = project.controller();
    controller.create(&name("StereoDelay")).unwrap();
    controller.create(&name("DelayPro")).unwrap();
    fs::create_dir(project.path(".git")).unwrap();

    let config =
        ScaffoldConfig { directory_match: DirectoryMatch::Substring, ..ScaffoldConfig::default() };
    let outcome = project.controller_with(config).delete(&name("Delay")).unwrap();

    assert!(!project.path("DelayPro").exists());
    assert!(project.path("StereoDelay").is_dir());
    assert!(project.path(".git").is_dir());
    assert_eq!(outcome.steps_with(StepStatus::NotFound).count(), 0);
}

#[test]
fn test_list_reports_registration_per_module() {
    let project = HostProject::new();
    let controller = project.controller();
    controller.create(&name("Gain")).unwrap();
    controller.create(&name("Chorus")).unwrap();
    fs::create_dir(project.path("Docs")).unwrap();

    let link_list = project.registry_path(RegistryKind::LinkList);
    let text = fs::read_to_string(&link_list).unwrap().replace("\tChorus\n", "");
    fs::write(&link_list, text).unwrap();

    let listings = controller.list().unwrap();

    let names: Vec<_> = listings.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Chorus", "Gain"]);
    assert!(!listings[0].is_fully_registered());
    assert!(!listings[0].registered_in.contains(&RegistryKind::LinkList));
    assert!(listings[1].is_fully_registered());
}

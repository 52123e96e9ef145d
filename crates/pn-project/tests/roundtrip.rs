use pn_project::schema::*;
use pn_project::{
    ProjectError, ValidationError, load_case, load_json, load_yaml, save_json, save_yaml,
    validate_case,
};

fn demo_case() -> CaseFile {
    CaseFile {
        version: CASE_VERSION,
        name: "Cooling loop".to_string(),
        fluid: "ethanol".to_string(),
        operating: OperatingDef {
            flow_m3h: 80.0,
            geometric_head_m: 12.5,
        },
        equipment: EquipmentDef {
            pump_efficiency: 0.65,
            motor_efficiency: 0.92,
            hours_per_day: 20.0,
            tariff_per_kwh: 0.5,
        },
        pre: vec![SegmentDef {
            length_m: 15.0,
            diameter_mm: 125.0,
            roughness_mm: 0.05,
            fittings: vec!["sharp_entrance".to_string(), "gate_valve_open".to_string()],
        }],
        branches: vec![
            BranchDef {
                name: "North".to_string(),
                segments: vec![SegmentDef::branch_default(), SegmentDef::series_default()],
            },
            BranchDef {
                name: "South".to_string(),
                segments: vec![SegmentDef::branch_default()],
            },
        ],
        post: vec![SegmentDef::series_default()],
        sweep: Some(SweepDef {
            low_percent: 80.0,
            high_percent: 120.0,
            step_percent: 10.0,
        }),
        solver: Some(SolverDef {
            max_iterations: Some(50),
            abs_tol_m: None,
        }),
    }
}

#[test]
fn roundtrip_yaml_example() {
    let case = CaseFile::example();
    let path = std::env::temp_dir().join("pn_project_roundtrip_example.yaml");

    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_yaml_full_case() {
    let case = demo_case();
    validate_case(&case).unwrap();

    let path = std::env::temp_dir().join("pn_project_roundtrip_full.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_full_case() {
    let case = demo_case();
    let path = std::env::temp_dir().join("pn_project_roundtrip_full.json");

    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(case, loaded);

    // Extension dispatch picks the JSON reader
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn save_refuses_invalid_case() {
    let mut case = demo_case();
    case.branches[1].name = "North".to_string();
    let path = std::env::temp_dir().join("pn_project_invalid.yaml");

    let err = save_yaml(&path, &case).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::DuplicateBranch { .. })
    ));
}

#[test]
fn load_reports_parse_errors() {
    let path = std::env::temp_dir().join("pn_project_garbage.yaml");
    std::fs::write(&path, "version: [not a number").unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Yaml(_))));
}

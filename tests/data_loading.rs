use std::{fs, path::Path};

use tempfile::tempdir;
use trial_safety_view::{
    data::{arms::parse_json, load_path, DataError},
    safety::ArmSafety,
};

const ARMS_JSON: &str = r#"[
  {
    "arm_name": "Arm A: Drug X + Standard Care",
    "arm_code": "ARM_A",
    "nct_number": "NCT01234567",
    "status": "ACTIVE",
    "latest_safety_metrics": {
      "safety_score": "72.40",
      "web": "146.00",
      "eair": "0.3500",
      "n_patients": 40,
      "person_years": "120.50",
      "e1_2_count": 20,
      "e3_4_count": 6,
      "e5_count": 1,
      "total_ae_count": 57,
      "patients_with_any_ae": 27,
      "data_cut_date": "2024-03-31",
      "computation_date": "2024-04-02"
    }
  },
  {
    "arm_name": "Arm B: Placebo",
    "arm_code": "ARM_B",
    "nct_number": "",
    "status": "COMPLETED",
    "latest_safety_metrics": null
  }
]"#;

fn cut(date: &str, score: f64) -> String {
    format!(
        r#"{{"safety_score": {score}, "web": 10, "eair": null, "n_patients": 10,
            "person_years": 5, "e1_2_count": 1, "e3_4_count": 0, "e5_count": 0,
            "total_ae_count": 1, "patients_with_any_ae": 1, "data_cut_date": "{date}"}}"#
    )
}

#[test]
fn decimal_strings_are_parsed_at_the_boundary() {
    let arms = parse_json(ARMS_JSON, Path::new("arms.json")).unwrap();
    assert_eq!(arms.len(), 2);

    let metrics = arms[0].metrics().expect("arm A has metrics");
    assert_eq!(metrics.safety_score, 72.4);
    assert_eq!(metrics.eair, Some(0.35));
    assert_eq!(metrics.person_years, 120.5);
    assert_eq!(metrics.n_patients, 40);
    assert_eq!(arms[0].nct_number.as_deref(), Some("NCT01234567"));

    assert_eq!(arms[1].safety, ArmSafety::Pending);
    assert_eq!(arms[1].nct_number, None);
    assert_eq!(arms[1].status, "COMPLETED");
}

#[test]
fn latest_cut_is_selected_from_history() {
    let json = format!(
        r#"{{"arm_name": "Arm C", "arm_code": "ARM_C", "safety_metrics": [{}, {}, {}]}}"#,
        cut("2023-12-31", 60.0),
        cut("2024-06-30", 81.0),
        cut("2024-03-31", 70.0)
    );
    let arms = parse_json(&json, Path::new("history.json")).unwrap();
    assert_eq!(arms.len(), 1);
    assert_eq!(arms[0].safety_score(), Some(81.0));
    assert_eq!(arms[0].status, "ACTIVE");
    assert_eq!(arms[0].metrics().unwrap().eair, None);

    let dates: Vec<_> = arms[0].history.iter().map(|m| m.data_cut_date.as_str()).collect();
    assert_eq!(dates, vec!["2024-06-30", "2024-03-31", "2023-12-31"]);
    assert_eq!(arms[0].cuts().len(), 3);
}

#[test]
fn latest_only_arm_has_single_cut() {
    let arms = parse_json(ARMS_JSON, Path::new("arms.json")).unwrap();
    assert!(arms[0].history.is_empty());
    assert_eq!(arms[0].cuts().len(), 1);
    assert!(arms[1].cuts().is_empty());
}

#[test]
fn paginated_api_page_is_accepted() {
    let json = format!(
        r#"{{"count": 1, "next": null, "results": [{{"arm_name": "Arm D", "arm_code": "ARM_D", "latest_safety_metrics": {}}}]}}"#,
        cut("2024-01-31", 42.0)
    );
    let arms = parse_json(&json, Path::new("page.json")).unwrap();
    assert_eq!(arms[0].arm_code, "ARM_D");
    assert_eq!(arms[0].safety_score(), Some(42.0));
}

#[test]
fn more_affected_patients_than_enrolled_is_rejected() {
    let json = ARMS_JSON.replace(r#""patients_with_any_ae": 27"#, r#""patients_with_any_ae": 50"#);
    let err = parse_json(&json, Path::new("arms.json")).unwrap_err();
    assert!(matches!(
        err,
        DataError::Invalid { field: "patients_with_any_ae", ref arm_code, .. } if arm_code == "ARM_A"
    ));
}

#[test]
fn negative_counts_are_rejected() {
    let json = ARMS_JSON.replace(r#""e5_count": 1"#, r#""e5_count": -1"#);
    let err = parse_json(&json, Path::new("arms.json")).unwrap_err();
    assert!(matches!(err, DataError::Invalid { field: "e5_count", .. }));
}

#[test]
fn malformed_json_names_the_file() {
    let err = parse_json("{not json", Path::new("broken.json")).unwrap_err();
    assert!(matches!(err, DataError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn bad_field_in_array_reports_the_field_error() {
    let json = ARMS_JSON.replace(r#""n_patients": 40"#, r#""n_patients": "forty""#);
    let err = parse_json(&json, Path::new("arms.json")).unwrap_err();
    assert!(matches!(err, DataError::Json { .. }));
    let message = err.to_string();
    assert!(message.contains("arms.json"));
    assert!(message.contains("line"), "{message}");
    assert!(!message.contains("did not match any variant"), "{message}");
}

#[test]
fn csv_row_with_score_but_blank_counts_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arms.csv");
    fs::write(
        &path,
        "arm_name,arm_code,nct_number,status,safety_score,web,eair,n_patients,person_years,e1_2_count,e3_4_count,e5_count,total_ae_count,patients_with_any_ae,data_cut_date,computation_date\n\
         Arm A,ARM_A,NCT01234567,ACTIVE,88.5,4.25,,30,60.0,,,,,,2024-03-31,2024-04-01\n",
    )
    .unwrap();

    let err = load_path(&path).unwrap_err();
    assert!(matches!(
        err,
        DataError::Invalid { field: "e1_2_count", ref arm_code, .. } if arm_code == "ARM_A"
    ));
}

#[test]
fn csv_rows_load_with_pending_arms() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arms.csv");
    fs::write(
        &path,
        "arm_name,arm_code,nct_number,status,safety_score,web,eair,n_patients,person_years,e1_2_count,e3_4_count,e5_count,total_ae_count,patients_with_any_ae,data_cut_date,computation_date\n\
         Arm A,ARM_A,NCT01234567,ACTIVE,88.5,4.25,,30,60.0,3,0,0,4,3,2024-03-31,2024-04-01\n\
         Arm B,ARM_B,,ACTIVE,,,,,,,,,,,,\n",
    )
    .unwrap();

    let arms = load_path(&path).unwrap();
    assert_eq!(arms.len(), 2);
    let metrics = arms[0].metrics().unwrap();
    assert_eq!(metrics.safety_score, 88.5);
    assert_eq!(metrics.eair, None);
    assert_eq!(metrics.patients_with_any_ae, 3);
    assert_eq!(arms[1].safety, ArmSafety::Pending);
    assert_eq!(arms[1].nct_number, None);
}

#[test]
fn directory_loading_skips_other_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.json"), ARMS_JSON).unwrap();
    fs::write(dir.path().join("notes.txt"), "not data").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(
        dir.path().join("nested").join("c.json"),
        format!(
            r#"{{"arm_name": "Arm C", "arm_code": "ARM_C", "latest_safety_metrics": {}}}"#,
            cut("2024-02-29", 55.0)
        ),
    )
    .unwrap();

    let arms = load_path(dir.path()).unwrap();
    let codes: Vec<_> = arms.iter().map(|arm| arm.arm_code.as_str()).collect();
    assert_eq!(codes, vec!["ARM_A", "ARM_B", "ARM_C"]);
}

#[test]
fn unsupported_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arms.xml");
    fs::write(&path, "<arms/>").unwrap();
    assert!(matches!(load_path(&path), Err(DataError::UnsupportedFormat(_))));
}

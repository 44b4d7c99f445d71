use crv_core::traits::Validate;
use crv_core::CurvesError;
use crv_primitive::{BasisKind, CurvesPrimitive, DataType, Interpolation, POSITION};

const TWO_CURVES: &str = r#"{
    "vertices_per_curve": [2, 3],
    "basis": "linear",
    "variables": {
        "P": {
            "name": "P",
            "interpolation": "vertex",
            "data": { "type": "vector", "values": [[0,0,0],[1,0,0],[0,1,0],[0,2,0],[0,3,0]] }
        },
        "width": {
            "name": "width",
            "interpolation": "varying",
            "data": { "type": "float", "values": [1.0, 2.0, 3.0, 4.0, 5.0] }
        }
    }
}"#;

#[test]
fn test_load_from_json() {
    let curves: CurvesPrimitive = serde_json::from_str(TWO_CURVES).unwrap();
    curves.validate().unwrap();

    assert_eq!(curves.num_curves(), 2);
    assert_eq!(curves.basis().kind(), BasisKind::Linear);
    assert!(!curves.periodic());
    assert_eq!(curves.positions().unwrap().len(), 5);

    let width = curves.variable("width").unwrap();
    assert_eq!(width.interpolation, Interpolation::Varying);
    assert_eq!(width.data_type(), DataType::Float);
}

#[test]
fn test_validate_catches_bad_json_sizes() {
    let json = TWO_CURVES.replace("[1.0, 2.0, 3.0, 4.0, 5.0]", "[1.0, 2.0]");
    let curves: CurvesPrimitive = serde_json::from_str(&json).unwrap();
    let err = curves.validate().unwrap_err();
    match err {
        CurvesError::InvalidVariable { name, .. } => assert_eq!(name, "width"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validate_catches_renamed_variable() {
    let json = TWO_CURVES.replace("\"name\": \"width\"", "\"name\": \"radius\"");
    let curves: CurvesPrimitive = serde_json::from_str(&json).unwrap();
    assert!(curves.validate().is_err());
}

#[test]
fn test_validate_catches_empty_curve() {
    let json = TWO_CURVES.replace("[2, 3]", "[0, 5]");
    let curves: CurvesPrimitive = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        curves.validate(),
        Err(CurvesError::InvalidArgument(_))
    ));
}

#[test]
fn test_serialize_keeps_positions() {
    let curves: CurvesPrimitive = serde_json::from_str(TWO_CURVES).unwrap();
    let text = serde_json::to_string(&curves).unwrap();
    let back: CurvesPrimitive = serde_json::from_str(&text).unwrap();
    assert_eq!(back.variable(POSITION), curves.variable(POSITION));
    assert_eq!(back.vertices_per_curve(), curves.vertices_per_curve());
}

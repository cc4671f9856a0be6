use wiqaya_core::models::{Derived, PatientClinicalRecord, PriorityLevel, RegistrationStatus};
use wiqaya_scoring::generate_prediction;
use wiqaya_scoring::prediction::{
    ACTION_CONSULTANT, ACTION_HIGH_PRIORITY, ACTION_ROUTINE, BpStage, REASON_IMPORTED,
    REASON_ROUTINE, confidence_score, diabetes_index, dyslipidemia_index, hypertension_index,
    risk_factors,
};

fn diabetic() -> PatientClinicalRecord {
    PatientClinicalRecord {
        id: "p-1".to_string(),
        has_diabetes: true,
        ..Default::default()
    }
}

#[test]
fn diabetic_with_high_hba1c_scenario() {
    let record = PatientClinicalRecord {
        hba1c_percent: Some(9.5),
        visit_count: 2,
        dm_meds_count: 1,
        ..diabetic()
    };
    let result = generate_prediction(&record);

    assert_eq!(result.dm_prediction_index, 20);
    assert_eq!(result.htn_prediction_index, 0);
    assert_eq!(result.ldl_prediction_index, 0);
    assert_eq!(result.overall_prediction_index, 20);
    assert_eq!(result.priority_level, PriorityLevel::HighPriority);
    assert!(result.priority_reason.contains("HbA1c=9.5%"));
    assert_eq!(result.suggested_action, ACTION_HIGH_PRIORITY);
    assert_eq!(result.confidence_score, 60);
}

#[test]
fn no_diseases_is_routine_with_zero_overall() {
    let result = generate_prediction(&PatientClinicalRecord::default());
    assert_eq!(result.overall_prediction_index, 0);
    assert_eq!(result.priority_level, PriorityLevel::Routine);
    assert_eq!(result.priority_reason, REASON_ROUTINE);
    assert_eq!(result.suggested_action, ACTION_ROUTINE);
    assert!(result.risk_factors.is_empty());
    assert_eq!(result.confidence_score, 0);
}

#[test]
fn diabetes_index_components() {
    // unknown HbA1c is neutral (15)
    let registered = PatientClinicalRecord {
        registration_status: RegistrationStatus::RegisteredEligible,
        ..diabetic()
    };
    assert_eq!(diabetes_index(&registered), 35);

    let capped = PatientClinicalRecord {
        visit_count: 12,
        dm_meds_count: 5,
        hba1c_percent: Some(6.4),
        registration_status: RegistrationStatus::parse("مسجل"),
        ..diabetic()
    };
    assert_eq!(diabetes_index(&capped), 30 + 15 + 20 + 30);

    let hba1c = |v| {
        diabetes_index(&PatientClinicalRecord {
            hba1c_percent: Some(v),
            ..diabetic()
        })
    };
    assert_eq!(hba1c(6.9), 30);
    assert_eq!(hba1c(7.0), 20);
    assert_eq!(hba1c(7.5), 20);
    assert_eq!(hba1c(8.0), 10);
    assert_eq!(hba1c(8.5), 10);
    assert_eq!(hba1c(9.0), 0);
}

#[test]
fn diabetes_index_is_zero_without_flag() {
    let record = PatientClinicalRecord {
        has_diabetes: false,
        hba1c_percent: Some(6.0),
        visit_count: 10,
        dm_meds_count: 2,
        ..Default::default()
    };
    assert_eq!(diabetes_index(&record), 0);
    assert_eq!(generate_prediction(&record).dm_prediction_index, 0);
}

#[test]
fn hypertension_index_by_stage() {
    let htn = |sys: Option<f64>, dia: Option<f64>| {
        hypertension_index(&PatientClinicalRecord {
            has_hypertension: true,
            visit_count: 3,
            htn_meds_count: 1,
            systolic_bp: sys,
            diastolic_bp: dia,
            ..Default::default()
        })
    };
    assert_eq!(htn(Some(115.0), Some(75.0)), 15 + 10 + 50);
    assert_eq!(htn(Some(125.0), Some(75.0)), 15 + 10 + 40);
    assert_eq!(htn(Some(125.0), Some(85.0)), 15 + 10 + 30);
    assert_eq!(htn(Some(150.0), Some(85.0)), 15 + 10 + 15);
    assert_eq!(htn(Some(170.0), Some(85.0)), 15 + 10);
    assert_eq!(htn(None, None), 15 + 10 + 25);
    assert_eq!(htn(None, Some(95.0)), 15 + 10 + 15);
}

#[test]
fn bp_stage_takes_the_worse_side() {
    assert_eq!(BpStage::classify(None, None), None);
    assert_eq!(BpStage::classify(Some(118.0), Some(92.0)), Some(BpStage::Stage2));
    assert_eq!(BpStage::classify(Some(182.0), Some(70.0)), Some(BpStage::Crisis));
    assert_eq!(BpStage::classify(Some(128.0), Some(79.0)), Some(BpStage::Elevated));
}

#[test]
fn dyslipidemia_index_components() {
    let record = PatientClinicalRecord {
        has_dyslipidemia: true,
        dlp_meds_count: 3,
        ldl_mg_dl: Some(120.0),
        bmi: Some(27.0),
        ..Default::default()
    };
    assert_eq!(dyslipidemia_index(&record), 30 + 40 + 10);

    let unknown = PatientClinicalRecord {
        has_dyslipidemia: true,
        ..Default::default()
    };
    assert_eq!(dyslipidemia_index(&unknown), 25 + 10);

    let severe = PatientClinicalRecord {
        has_dyslipidemia: true,
        ldl_mg_dl: Some(195.0),
        bmi: Some(33.0),
        ..Default::default()
    };
    assert_eq!(dyslipidemia_index(&severe), 0);
}

#[test]
fn consultant_tier_fires_on_any_single_clause() {
    let record = PatientClinicalRecord {
        hba1c_percent: Some(12.0),
        systolic_bp: Some(120.0),
        ..diabetic()
    };
    let result = generate_prediction(&record);
    assert_eq!(result.priority_level, PriorityLevel::ConsultantPlusEducator);
    assert_eq!(result.priority_reason, "HbA1c=12%");
    assert_eq!(result.suggested_action, ACTION_CONSULTANT);
}

#[test]
fn reason_lists_only_triggers_of_the_winning_tier() {
    let record = PatientClinicalRecord {
        ldl_mg_dl: Some(170.0),
        systolic_bp: Some(185.0),
        ..Default::default()
    };
    let result = generate_prediction(&record);
    assert_eq!(result.priority_level, PriorityLevel::ConsultantPlusEducator);
    assert_eq!(result.priority_reason, "SBP=185 mmHg");

    let both = PatientClinicalRecord {
        hba1c_percent: Some(9.1),
        ldl_mg_dl: Some(165.0),
        ..Default::default()
    };
    let result = generate_prediction(&both);
    assert_eq!(result.priority_level, PriorityLevel::HighPriority);
    assert_eq!(result.priority_reason, "HbA1c=9.1%, LDL=165 mg/dL");
}

#[test]
fn provided_priority_bypasses_cascade() {
    let record = PatientClinicalRecord {
        hba1c_percent: Some(13.0),
        priority_level: Derived::Provided(PriorityLevel::Routine),
        ..diabetic()
    };
    let result = generate_prediction(&record);
    assert_eq!(result.priority_level, PriorityLevel::Routine);
    assert_eq!(result.priority_reason, REASON_IMPORTED);
    assert_eq!(result.suggested_action, ACTION_ROUTINE);

    let with_reason = PatientClinicalRecord {
        priority_reason: Derived::Provided("clinic override".to_string()),
        ..record
    };
    assert_eq!(
        generate_prediction(&with_reason).priority_reason,
        "clinic override"
    );
}

#[test]
fn provided_indices_pass_through() {
    let record = PatientClinicalRecord {
        has_hypertension: true,
        dm_prediction_index: Derived::Provided(60),
        htn_prediction_index: Derived::Provided(0),
        ldl_prediction_index: Derived::Provided(90),
        confidence_score: Derived::Provided(42),
        risk_factors: Derived::Provided(vec!["imported".to_string()]),
        ..diabetic()
    };
    let result = generate_prediction(&record);
    assert_eq!(result.dm_prediction_index, 60);
    assert_eq!(result.htn_prediction_index, 0);
    assert_eq!(result.ldl_prediction_index, 90);
    // zero HTN index and absent dyslipidemia are both excluded from the mean
    assert_eq!(result.overall_prediction_index, 60);
    assert_eq!(result.confidence_score, 42);
    assert_eq!(result.risk_factors, vec!["imported".to_string()]);
}

#[test]
fn overall_index_averages_present_diseases() {
    let record = PatientClinicalRecord {
        has_diabetes: true,
        has_hypertension: true,
        dm_prediction_index: Derived::Provided(41),
        htn_prediction_index: Derived::Provided(60),
        ..Default::default()
    };
    // (41 + 60) / 2 = 50.5 rounds up
    assert_eq!(generate_prediction(&record).overall_prediction_index, 51);
}

#[test]
fn risk_factors_in_order() {
    let record = PatientClinicalRecord {
        age: Some(70),
        has_diabetes: true,
        has_hypertension: true,
        has_dyslipidemia: true,
        hba1c_percent: Some(7.2),
        ldl_mg_dl: Some(140.0),
        systolic_bp: Some(150.0),
        bmi: Some(31.5),
        ..Default::default()
    };
    assert_eq!(
        risk_factors(&record),
        vec![
            "HbA1c elevated (7.2%)",
            "LDL elevated (140 mg/dL)",
            "High blood pressure (150 mmHg)",
            "Obesity (BMI 31.5)",
            "Age 70 years",
            "Multiple chronic conditions (3)",
        ]
    );
}

#[test]
fn two_conditions_are_not_multiple() {
    let record = PatientClinicalRecord {
        has_diabetes: true,
        has_hypertension: true,
        ..Default::default()
    };
    assert!(risk_factors(&record).is_empty());
}

#[test]
fn confidence_weights() {
    let complete = PatientClinicalRecord {
        hba1c_percent: Some(7.0),
        ldl_mg_dl: Some(100.0),
        systolic_bp: Some(120.0),
        bmi: Some(24.0),
        visit_count: 1,
        htn_meds_count: 1,
        ..Default::default()
    };
    assert_eq!(confidence_score(&complete), 100);

    let partial = PatientClinicalRecord {
        ldl_mg_dl: Some(100.0),
        bmi: Some(24.0),
        ..Default::default()
    };
    assert_eq!(confidence_score(&partial), 25);
}

#[test]
fn non_finite_labs_are_unknown() {
    let record = PatientClinicalRecord {
        hba1c_percent: Some(f64::INFINITY),
        ..diabetic()
    };
    let result = generate_prediction(&record);
    assert_eq!(result.dm_prediction_index, 15);
    assert_eq!(result.priority_level, PriorityLevel::Routine);
}

#[test]
fn ldl_and_bmi_boundaries_fall_into_the_worse_band() {
    let dlp = |ldl: Option<f64>, bmi: Option<f64>| {
        dyslipidemia_index(&PatientClinicalRecord {
            has_dyslipidemia: true,
            ldl_mg_dl: ldl,
            bmi,
            ..Default::default()
        })
    };
    // unknown BMI contributes 10
    assert_eq!(dlp(Some(99.9), None), 50 + 10);
    assert_eq!(dlp(Some(100.0), None), 40 + 10);
    assert_eq!(dlp(Some(130.0), None), 25 + 10);
    assert_eq!(dlp(Some(160.0), None), 10 + 10);
    assert_eq!(dlp(Some(190.0), None), 10);

    // unknown LDL contributes 25
    assert_eq!(dlp(None, Some(24.9)), 25 + 20);
    assert_eq!(dlp(None, Some(25.0)), 25 + 10);
    assert_eq!(dlp(None, Some(30.0)), 25);
}

#[test]
fn cascade_thresholds_are_inclusive() {
    let level = |record: PatientClinicalRecord| generate_prediction(&record).priority_level;

    let sbp = |v| PatientClinicalRecord {
        systolic_bp: Some(v),
        ..Default::default()
    };
    assert_eq!(level(sbp(159.0)), PriorityLevel::Routine);
    assert_eq!(level(sbp(160.0)), PriorityLevel::HighPriority);
    assert_eq!(level(sbp(179.0)), PriorityLevel::HighPriority);
    assert_eq!(level(sbp(180.0)), PriorityLevel::ConsultantPlusEducator);

    let ldl = |v| PatientClinicalRecord {
        ldl_mg_dl: Some(v),
        ..Default::default()
    };
    assert_eq!(level(ldl(159.0)), PriorityLevel::Routine);
    assert_eq!(level(ldl(160.0)), PriorityLevel::HighPriority);
    assert_eq!(level(ldl(190.0)), PriorityLevel::ConsultantPlusEducator);

    let hba1c = |v| PatientClinicalRecord {
        hba1c_percent: Some(v),
        ..Default::default()
    };
    assert_eq!(level(hba1c(8.9)), PriorityLevel::Routine);
    assert_eq!(level(hba1c(9.0)), PriorityLevel::HighPriority);
    assert_eq!(level(hba1c(11.9)), PriorityLevel::HighPriority);
}

#[test]
fn risk_factor_thresholds_are_inclusive() {
    let record = PatientClinicalRecord {
        age: Some(65),
        hba1c_percent: Some(7.0),
        ldl_mg_dl: Some(130.0),
        systolic_bp: Some(140.0),
        bmi: Some(30.0),
        ..Default::default()
    };
    assert_eq!(risk_factors(&record).len(), 5);

    let below = PatientClinicalRecord {
        age: Some(64),
        hba1c_percent: Some(6.9),
        ldl_mg_dl: Some(129.0),
        systolic_bp: Some(139.0),
        bmi: Some(29.9),
        ..Default::default()
    };
    assert!(risk_factors(&below).is_empty());
}

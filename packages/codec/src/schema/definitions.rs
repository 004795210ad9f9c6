//! Section and element definitions for PAS5500 stepper jobfiles.
//!
//! Element order within each section is significant: the parser only
//! accepts elements in exactly this order.

use super::core::SchemaRegistry;
use super::types::{SchemaEntry, SectionSchema};
use crate::types::ScalarType;

fn int(name: &'static str, arity: usize) -> SchemaEntry {
    SchemaEntry::new(name, arity, ScalarType::Int)
}

fn float(name: &'static str, arity: usize) -> SchemaEntry {
    SchemaEntry::new(name, arity, ScalarType::Float)
}

fn string(name: &'static str, arity: usize) -> SchemaEntry {
    SchemaEntry::new(name, arity, ScalarType::String)
}

fn multiline(name: &'static str, arity: usize) -> SchemaEntry {
    SchemaEntry::new(name, arity, ScalarType::Multiline)
}

const YES_NO: [&str; 2] = ["Y", "N"];
const WAFER_SIDES: [&str; 2] = ["A", "B"];

/// Create the registry of every section a jobfile may contain.
#[must_use]
pub fn create_jobfile_registry() -> SchemaRegistry {
    SchemaRegistry::new(vec![
        general(),
        alignment_mark(),
        wafer_align_strategy(),
        mark_alignment(),
        image_definition(),
        instance_definition(),
        image_distribution(),
        layer_definition(),
        marks_selection(),
        strategy_selection(),
        process_data(),
        reticle_data(),
        exposure_data(),
        level_sensor_area(),
        focus_monitoring_wea(),
        measurement_point(),
    ])
}

fn general() -> SectionSchema {
    SectionSchema::required("GENERAL").single().with_elements(vec![
        multiline("COMMENT", 3),
        string("MACHINE_TYPE", 1)
            .default("PAS5500/100")
            .one_of(["PAS5500/80", "PAS5500/100", "PAS5500/275"]),
        int("RETICLE_SIZE", 1).default(6).one_of([5, 6]),
        float("WFR_DIAMETER", 1)
            .default(150.0)
            .one_of([76.2, 100.0, 125.0, 150.0, 200.0]),
        string("WFR_NOTCH", 1).default("N").one_of(YES_NO),
        float("CELL_SIZE", 2).required().default(vec![10.0, 10.0]),
        float("ROUND_EDGE_CLEARANCE", 1).default(2.0).range(0.0, 20.0),
        float("FLAT_EDGE_CLEARANCE", 1).default(2.0).range(0.0, 20.0),
        float("EDGE_EXCLUSION", 1).default(3.0).range(0.0, 5.0),
        string("COVER_MODE", 1).default("I").one_of(["W", "I"]),
        int("NUMBER_DIES", 2).default(vec![1, 1]),
        int("MIN_NUMBER_DIES", 1),
        string("PLACEMENT_MODE", 1).default("O").one_of(["O", "C"]),
        float("MATRIX_SHIFT", 2).default(vec![0.0, 0.0]),
        string("PREALIGN_METHOD", 1).default("STANDARD"),
        float("WAFER_ROTATION", 1).default(0.0).range(-360.0, 360.0),
        string("COMBINE_ZERO_FIRST", 1).default("N").one_of(YES_NO),
        string("MARK_CLEAR_OUT", 1).default("N").one_of(YES_NO),
        string("MATCHING_SET_ID", 1).default("DEFAULT"),
    ])
}

fn alignment_mark() -> SectionSchema {
    SectionSchema::optional("ALIGNMENT_MARK")
        .identified_by(["MARK_ID"])
        .with_elements(vec![
            string("MARK_ID", 1).required(),
            string("IMAGE_ID", 1),
            string("MARK_EDGE_CLEARANCE", 1).default("L").one_of(["L", "S"]),
            string("WAFER_SIDE", 1).default("A").one_of(WAFER_SIDES),
            float("MARK_LOCATION", 2).required(),
        ])
}

fn wafer_align_strategy() -> SectionSchema {
    SectionSchema::optional("WFR_ALIGN_STRATEGY")
        .identified_by(["STRATEGY_ID"])
        .with_elements(vec![
            string("STRATEGY_ID", 1).required(),
            string("WAFER_ALIGNMENT_METHOD", 1).one_of(["O", "T", "N"]),
            int("NR_OF_MARKS_TO_USE", 1).range(2, 200),
            int("NR_OF_X_MARKS_TO_USE", 1).range(2, 200),
            int("NR_OF_Y_MARKS_TO_USE", 1).range(2, 200),
            float("MIN_MARK_DISTANCE_COARSE", 1).range(0.1, 200.0),
            int("MIN_MARK_DISTANCE", 1).range(0, 100),
            float("MAX_80_88_MARK_SHIFT", 1).range(0.0, 0.5),
            float("MAX_MARK_RESIDUE", 1).range(0.0, 4000.0),
            string("SPM_MARK_SCAN", 1).one_of(["S", "F"]),
            string("CORR_WAFER_GRID", 1),
            string("ERR_DETECTION_88_8", 1)
                .default("M")
                .one_of(["M", "E", "D"]),
            string("GRID_OPTIMISATION_ALGORITHM", 1).one_of(["N", "F"]),
            float("FLYER_REMOVAL_THRESHOLD", 1).range(0.0, 10.0),
            string("ALIGNMENT_MONITORING", 1).one_of(["N", "O", "A", "D"]),
        ])
}

fn mark_alignment() -> SectionSchema {
    SectionSchema::optional("MARK_ALIGNMENT")
        .identified_by(["MARK_ID"])
        .with_elements(vec![
            string("STRATEGY_ID", 1)
                .required()
                .defined_in("WFR_ALIGN_STRATEGY"),
            string("MARK_ID", 1).required().defined_in("ALIGNMENT_MARK"),
            string("GLBL_MARK_USAGE", 1).one_of(["E", "A", "C", "F", "N"]),
            string("MARK_PREFERENCE", 1).one_of(["P", "B"]),
        ])
}

fn image_definition() -> SectionSchema {
    SectionSchema::required("IMAGE_DEFINITION")
        .identified_by(["IMAGE_ID"])
        .with_elements(vec![
            string("IMAGE_ID", 1).required().default("NONAME"),
            string("RETICLE_ID", 1).default("NONAME"),
            float("IMAGE_SIZE", 2).required(),
            float("IMAGE_SHIFT", 2),
            float("MASK_SIZE", 2),
            float("MASK_SHIFT", 2),
            string("BASE_IMAGE_ID", 1),
            string("VARIANT_ID", 1).default(""),
        ])
}

fn instance_definition() -> SectionSchema {
    SectionSchema::optional("INSTANCE_DEFINITION")
        .identified_by(["INSTANCE_ID"])
        .with_elements(vec![string("INSTANCE_ID", 1)
            .required()
            .fix_delimiter_bug()])
}

fn image_distribution() -> SectionSchema {
    SectionSchema::optional("IMAGE_DISTRIBUTION")
        .identified_by(["IMAGE_ID", "INSTANCE_ID", "CELL_SELECTION"])
        .with_elements(vec![
            string("IMAGE_ID", 1).required(),
            string("INSTANCE_ID", 1)
                .required()
                .default("<Default>")
                .fix_delimiter_bug(),
            string("CELL_SELECTION", 2).required(),
            string("DISTRIBUTION_ACTION", 1)
                .required()
                .default("I")
                .one_of(["I", "S", "D"]),
            string("OPTIMIZE_ROUTE", 1).default("N"),
            float("IMAGE_CELL_SHIFT", 2)
                .required()
                .default(vec![0.0, 0.0]),
        ])
}

fn layer_definition() -> SectionSchema {
    // Identified by the layer number: LAYER_ID is optional in this section.
    SectionSchema::required("LAYER_DEFINITION")
        .identified_by(["LAYER_NO"])
        .with_elements(vec![
            int("LAYER_NO", 1).required(),
            string("LAYER_ID", 1),
            string("WAFER_SIDE", 1).default("A").one_of(WAFER_SIDES),
        ])
}

fn marks_selection() -> SectionSchema {
    SectionSchema::optional("MARKS_SELECTION")
        .identified_by(["LAYER_ID", "MARK_ID"])
        .with_elements(vec![
            string("LAYER_ID", 1)
                .required()
                .defined_in("LAYER_DEFINITION"),
            string("MARK_ID", 1).required().defined_in("ALIGNMENT_MARK"),
            string("GLBL_MARK_USAGE", 1),
        ])
}

fn strategy_selection() -> SectionSchema {
    SectionSchema::optional("STRATEGY_SELECTION")
        .identified_by(["LAYER_ID"])
        .with_elements(vec![
            string("LAYER_ID", 1)
                .required()
                .defined_in("LAYER_DEFINITION"),
            string("STRATEGY_ID", 1)
                .required()
                .defined_in("WFR_ALIGN_STRATEGY"),
            string("STRATEGY_USAGE", 1).required().one_of(["A", "E"]),
        ])
}

fn process_data() -> SectionSchema {
    SectionSchema::optional("PROCESS_DATA")
        .identified_by(["LAYER_ID"])
        .with_elements(vec![
            string("LAYER_ID", 1)
                .required()
                .defined_in("LAYER_DEFINITION"),
            int("LENS_REDUCTION", 1),
            string("CALIBRATION", 1),
            string("OPTICAL_PREALIGNMENT", 1),
            string("OPT_PREALIGN_MARKS", 2),
            string("GLBL_WFR_ALIGNMENT", 1),
            string("COO_REDUCTION", 1),
            string("MIN_NUMBER_PULSES_IN_SLIT", 1),
            int("MIN_NUMBER_PULSES", 1),
            string("SKIP_COARSE_WAFER_ALIGN", 1),
            string("REDUCE_RETICLE_ALIGN", 1),
            float("REDUCE_RA_DRIFT", 1),
            int("REDUCE_RA_INTERVAL", 1),
            string("RET_COOL_CORR", 1),
            int("RET_COOL_TIME", 1),
            string("RET_COOL_START_ON_LOAD", 1),
            string("RET_COOL_USAGE", 1),
            string("GLBL_RTCL_ALIGNMENT", 1),
            string("GLBL_OVERLAY_ENHANCEMENT", 1),
            string("GLBL_SYM_ALIGNMENT", 1),
            float("LAYER_SHIFT", 2),
            string("CORR_WAFER_GRID", 1),
            int("NR_OF_MARKS_TO_USE", 1),
            float("MIN_MARK_DISTANCE_COARSE", 1),
            int("MIN_MARK_DISTANCE", 1),
            float("MAX_80_88_SHIFT", 1),
            float("MAX_MARK_RESIDUE", 1),
            string("SPM_MARK_SCAN", 1),
            string("ERR_DETECTION_88_8", 1),
            float("CORR_INTER_FLD_EXPANSION", 2),
            float("CORR_INTER_FLD_NONORTHO", 1),
            float("CORR_INTER_FLD_ROTATION", 1),
            float("CORR_INTER_FLD_TRANSLATION", 2),
            float("CORR_INTRA_FLD_MAGNIFICATION", 1),
            float("CORR_INTRA_FLD_ROTATION", 1),
            float("CORR_INTRA_FLD_TRANSLATION", 2),
            float("CORR_INTRA_FLD_ASYM_ROTATION", 1),
            float("CORR_INTRA_FLD_ASYM_MAGN", 1),
            float("CORR_PREALIGN_ROTATION", 1),
            float("CORR_PREALIGN_TRANSLATION", 2),
            float("CORR_80_88_MARK_SHIFT", 4),
            float("CORR_LENS_HEATING", 1),
            float("NUMERICAL_APERTURE", 1),
            float("SIGMA_INNER", 1),
            float("SIGMA_OUTER", 1),
            string("RTCL_CHECK_SURFACES", 1),
            int("RTCL_CHECK_LIMITS_UPPER", 3),
            int("RTCL_CHECK_LIMITS_LOWER", 3),
            string("ALIGNMENT_METHOD", 1),
            string("REALIGNMENT_METHOD", 1).required(),
            string("IMAGE_ORDER_OPTIMISATION", 1),
            string("RETICLE_ALIGNMENT", 1),
            string("USE_DEFAULT_RETICLE_ALIGNMENT_METHOD", 1),
            int("CRITICAL_PERCENTAGE", 1),
            string("SHARE_LEVEL_INFO", 1),
            float("FOCUS_EDGE_CLEARANCE", 1),
            string("INLINE_Q_ABOVE_P_CALIBRATION", 1),
            string("SHIFTED_MEASUREMENT_SCANS", 1),
            string("FOCUS_MONITORING", 1),
            string("FOCUS_MONITORING_SCANNER", 1),
            string("DYN_PERF_MONITORING", 1),
            string("FORCE_MEANDER_ENABLED", 1),
        ])
}

fn reticle_data() -> SectionSchema {
    SectionSchema::optional("RETICLE_DATA")
        .identified_by(["LAYER_ID", "IMAGE_ID"])
        .with_elements(vec![
            string("LAYER_ID", 1)
                .required()
                .defined_in("LAYER_DEFINITION"),
            string("IMAGE_ID", 1)
                .required()
                .defined_in("IMAGE_DEFINITION"),
            string("IMAGE_USAGE", 1).one_of(YES_NO),
            string("RETICLE_ID", 1),
            float("IMAGE_SIZE", 2),
            float("IMAGE_SHIFT", 2),
            float("MASK_SIZE", 2),
            float("MASK_SHIFT", 2),
            float("ENERGY_ACTUAL", 1),
            float("FOCUS_ACTUAL", 1),
            float("FOCUS_TILT", 2),
            float("NUMERICAL_APERTURE", 1),
            float("SIGMA_INNER", 1),
            float("SIGMA_OUTER", 1),
            int("IMAGE_EXPOSURE_ORDER", 1),
            string("LITHOGRAPHY_PROCESS", 1),
            float("IMAGE_INTRA_FLD_COR_TRANS", 2),
            float("IMAGE_INTRA_FLD_COR_ROT", 1),
            float("IMAGE_INTRA_FLD_COR_ASYM_ROT", 1),
            float("IMAGE_INTRA_FLD_COR_MAG", 1),
            float("IMAGE_INTRA_FLD_COR_ASYM_MAG", 1),
            string("LEVEL_METHOD_Z", 1),
            string("LEVEL_METHOD_RX", 1),
            string("LEVEL_METHOD_RY", 1),
            float("EXTRAPOLATION_DISTANCE", 1),
            string("SCAN_DIRECTION", 1),
            string("DIE_SIZE_DEPENDENCY", 1),
            string("ENABLE_EFESE", 1),
            string("CD_FEC_MODE", 1),
            float("CD_FEC_OFFSET", 2),
            string("DOSE_CORRECTION", 1),
            string("DOSE_CRITICAL_IMAGE", 1),
            float("GLOBAL_LEVEL_POINT_1", 2).required(),
            float("GLOBAL_LEVEL_POINT_2", 2).required(),
            float("GLOBAL_LEVEL_POINT_3", 2).required(),
        ])
}

fn exposure_data() -> SectionSchema {
    SectionSchema::optional("EXPOSURE_DATA")
        .identified_by(["LAYER_ID", "IMAGE_ID", "CELL_SELECTION"])
        .with_elements(vec![
            string("LAYER_ID", 1)
                .required()
                .defined_in("LAYER_DEFINITION"),
            string("IMAGE_ID", 1)
                .required()
                .defined_in("IMAGE_DEFINITION"),
            string("CELL_SELECTION", 2).required(),
            float("ENERGY_OFFSET", 1),
            float("ENERGY_REL_OFFSET", 1),
            float("FOCUS_OFFSET", 1),
            float("FOCUS_TILE_OFFSET", 2),
            float("TRANSLATION_OFFSET", 2),
        ])
}

fn level_sensor_area() -> SectionSchema {
    SectionSchema::optional("LEVEL_SENSOR_AREA")
        .identified_by(["LAYER_ID", "IMAGE_ID", "CELL_SELECTION"])
        .with_elements(vec![
            string("LAYER_ID", 1).required(),
            string("IMAGE_ID", 1).required(),
            string("CELL_SELECTION", 2).required(),
            float("AREA", 4).required(),
            string("USABLE_AREA", 1).required(),
        ])
}

fn focus_monitoring_wea() -> SectionSchema {
    SectionSchema::optional("FOCUS_MONITORING_WEA")
        .identified_by(["LAYER_ID"])
        .with_elements(vec![
            string("LAYER_ID", 1).required(),
            float("FOCUS_MONITORING_WEA_LL_X", 1),
            float("FOCUS_MONITORING_WEA_LL_Y", 1),
            float("FOCUS_MONITORING_WEA_UR_X", 1),
            float("FOCUS_MONITORING_WEA_UR_Y", 1),
        ])
}

fn measurement_point() -> SectionSchema {
    SectionSchema::optional("MEASUREMENT_POINT")
        .identified_by(["MEASUREMENT_POINT_ID", "MEASUREMENT_POS"])
        .with_elements(vec![
            string("MEASUREMENT_POINT_ID", 1).required(),
            float("MEASUREMENT_POS", 2).required(),
        ])
}

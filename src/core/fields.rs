//! Static field tables and sheet layout anchors.
//!
//! Output keys are literals fixed at configuration time; nothing builds a
//! column name at run time.

/// Similarity cutoff for fuzzy label lookups.
pub const FUZZY_CUTOFF: f64 = 0.70;

// FMV sheet anchors (zero-indexed row, column).
pub const PROPERTY_ID_CELL: (usize, usize) = (2, 0);
pub const VERSION_CELL: (usize, usize) = (3, 0);

// Key metrics: labels down column E, values in column H.
pub const KEY_METRIC_LABEL_COL: usize = 4;
pub const KEY_METRIC_VALUE_COL: usize = 7;

// GAV/FMV block: column J joins against the workbook version.
pub const VERSION_JOIN_COL: usize = 9;
pub const GAV_COL: usize = 10;
pub const FMV_COL: usize = 11;

// Cash-flow series: columns N (dates) and O (amounts) from row 7 down.
pub const CASH_FLOW_START_ROW: usize = 6;
pub const CASH_FLOW_DATE_COL: usize = 13;
pub const CASH_FLOW_AMOUNT_COL: usize = 14;

/// Which axis of a grid carries the labels for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Labels run down a column; a resolved position is a row index.
    Rows,
    /// Labels run across a row; a resolved position is a column index.
    Columns,
}

/// The sheets a recipe may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Fmv,
    DcfModel,
    Inputs,
}

impl SheetKind {
    pub fn sheet_name(self) -> &'static str {
        match self {
            SheetKind::Fmv => "FMV",
            SheetKind::DcfModel => "DCF Model",
            SheetKind::Inputs => "Inputs",
        }
    }
}

/// One value to extract: output key plus the literal searched for, which may
/// differ from the key (WALE's label reads "WALE (Years)").
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub search: &'static str,
}

/// Key-metric fields resolved fuzzily against the FMV label column, in
/// output-column order. Scenario is caller-supplied and the 10Y Unlevered
/// DCF / GAV / FMV values resolve by exact match, so none appear here.
pub const KEY_METRICS_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "WALE", search: "wale (years)" },
    FieldSpec { name: "InPlaceRent", search: "inplacerent" },
    FieldSpec { name: "InPlaceNOI", search: "inplacenoi" },
    FieldSpec { name: "InPlaceCapRate", search: "inplacecaprate" },
    FieldSpec { name: "DistributionsToDate", search: "distributionstodate" },
    FieldSpec { name: "CurrentLiquidity", search: "currentliquidity" },
    FieldSpec { name: "CostBasis", search: "costbasis" },
    FieldSpec { name: "HoldPeriod", search: "holdperiod" },
    FieldSpec { name: "ExitCapRate", search: "exitcaprate" },
    FieldSpec { name: "ExitNOI", search: "exitnoi" },
    FieldSpec { name: "ExitPrice", search: "exitprice" },
    FieldSpec { name: "ExitPricePSF", search: "exitpricepsf" },
    FieldSpec { name: "LIRR", search: "lirr" },
    FieldSpec { name: "EquityMultiple", search: "equitymultiple" },
    FieldSpec { name: "TotalProfit", search: "totalprofit" },
    FieldSpec { name: "InitialEquity", search: "initialequity" },
    FieldSpec { name: "AdditionalEquity", search: "additionalequity" },
    FieldSpec { name: "TotalEquity", search: "totalequity" },
    FieldSpec { name: "InitialDebt", search: "initialdebt" },
    FieldSpec { name: "Holdbacks", search: "holdbacks" },
    FieldSpec { name: "AdditionalProceeds", search: "additionalproceeds" },
    FieldSpec { name: "TotalDebt", search: "totaldebt" },
];

// Exact-match key metrics.
pub const UNLEVERED_DCF_FIELD: &str = "10Y Unlevered DCF";
pub const UNLEVERED_DCF_SEARCH: &str = "10y unlevered dcf";
pub const GAV_FIELD: &str = "GAV";
pub const FMV_FIELD: &str = "FMV";

/// A general-assumption field: where its labels live and how far the value
/// sits from a matched label along the other axis.
#[derive(Debug, Clone, Copy)]
pub struct AssumptionSpec {
    pub field: FieldSpec,
    pub sheet: SheetKind,
    pub axis: Axis,
    pub label_index: usize,
    pub value_offset: usize,
}

/// General-assumption fields in output-column order. Inputs-sheet fields
/// carry the `_Input` suffix in their output keys.
pub const ASSUMPTION_FIELDS: &[AssumptionSpec] = &[
    AssumptionSpec {
        field: FieldSpec { name: "Valuation_Date", search: "valuation date" },
        sheet: SheetKind::Fmv,
        axis: Axis::Rows,
        label_index: KEY_METRIC_LABEL_COL,
        value_offset: 3,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Year_Built", search: "year built" },
        sheet: SheetKind::Fmv,
        axis: Axis::Rows,
        label_index: KEY_METRIC_LABEL_COL,
        value_offset: 3,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Discount_Rate", search: "discount rate" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Rows,
        label_index: 1,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Terminal_Cap_Rate", search: "terminal cap rate" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Rows,
        label_index: 1,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Market_Rent_Growth", search: "market rent growth" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Rows,
        label_index: 1,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Expense_Growth", search: "expense growth" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Rows,
        label_index: 1,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "General_Vacancy", search: "general vacancy" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Rows,
        label_index: 1,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "As_Of_Date", search: "as of" },
        sheet: SheetKind::DcfModel,
        axis: Axis::Columns,
        label_index: 0,
        value_offset: 1,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Interest_Rate_Caps_Input", search: "interest rate caps" },
        sheet: SheetKind::Inputs,
        axis: Axis::Rows,
        label_index: 0,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Loan_Maturity_Input", search: "loan maturity" },
        sheet: SheetKind::Inputs,
        axis: Axis::Rows,
        label_index: 0,
        value_offset: 2,
    },
    AssumptionSpec {
        field: FieldSpec { name: "Extension_Options_Input", search: "extension options" },
        sheet: SheetKind::Inputs,
        axis: Axis::Rows,
        label_index: 0,
        value_offset: 2,
    },
];

// The fund row is an exact match on the Inputs sheet, value in the adjacent
// column.
pub const FUND_FIELD: &str = "Fund";
pub const FUND_SEARCH: &str = "fund";
pub const FUND_LABEL_COL: usize = 0;
pub const FUND_VALUE_COL: usize = 1;

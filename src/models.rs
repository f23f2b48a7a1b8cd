//! Record kinds served by the API and their table bindings.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::sql::SqlValue;
use crate::table::{Column, ColumnKind, TableSpec};

/// A record kind bound to one table.
///
/// Missing JSON fields decode to the type's zero value (`Default`), unknown
/// fields are ignored.
pub trait Record: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const SPEC: &'static TableSpec;

    /// Key cells, in `SPEC.key` order.
    fn key(&self) -> Vec<SqlValue>;

    /// Value cells, in `SPEC.values` order.
    fn values(&self) -> Vec<SqlValue>;

    /// Build a record from a full row (key cells then value cells).
    fn from_row(row: Vec<SqlValue>) -> Result<Self, AppError>;

    /// Merge a store-generated key into the record. No-op for caller-keyed kinds.
    fn set_generated_key(&mut self, _id: i32) {}
}

/// Reads cells off a row in order.
struct RowReader {
    cells: std::vec::IntoIter<SqlValue>,
}

impl RowReader {
    fn new(spec: &TableSpec, row: Vec<SqlValue>) -> Result<Self, AppError> {
        if row.len() != spec.width() {
            return Err(AppError::Decode(format!(
                "{}: expected {} columns, got {}",
                spec.table,
                spec.width(),
                row.len()
            )));
        }
        Ok(RowReader { cells: row.into_iter() })
    }

    fn next(&mut self) -> Result<SqlValue, AppError> {
        self.cells
            .next()
            .ok_or_else(|| AppError::Decode("row ended early".into()))
    }

    fn int(&mut self) -> Result<i32, AppError> {
        self.next()?.as_int()
    }

    fn float(&mut self) -> Result<f64, AppError> {
        self.next()?.as_float()
    }

    fn text(&mut self) -> Result<String, AppError> {
        let cell = self.next()?;
        cell.as_text().map(str::to_owned)
    }

    fn date(&mut self) -> Result<NaiveDate, AppError> {
        self.next()?.as_date()
    }
}

/// Generic entity: a name and a type code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Object {
    /// Assigned by the store on create.
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: i32,
}

/// A well identified by its number, tagged with administrative classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Well {
    pub well: i32,
    /// Administrative unit.
    pub ngdu: i32,
    /// Sub-unit.
    pub cdng: i32,
    /// Pad.
    pub kust: i32,
    /// Field.
    pub mest: i32,
}

/// Realized measurements of one well for one day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WellDayHistory {
    pub well: i32,
    pub date_fact: NaiveDate,
    pub debit: f64,
    pub ee_consume: f64,
    pub expenses: f64,
    pub pump_operating: f64,
}

/// Planned measurements of one well for one day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WellDayPlan {
    pub well: i32,
    pub date_plan: NaiveDate,
    pub debit: f64,
    pub ee_consume: f64,
    pub expenses: f64,
    pub pump_operating: f64,
}

const DAY_MEASUREMENTS: &[Column] = &[
    Column::new("debit", ColumnKind::Float),
    Column::new("ee_consume", ColumnKind::Float),
    Column::new("expenses", ColumnKind::Float),
    Column::new("pump_operating", ColumnKind::Float),
];

impl Record for Object {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "objects",
        key: &[Column::new("id", ColumnKind::Int)],
        values: &[
            Column::new("name", ColumnKind::Text),
            Column::new("type", ColumnKind::Int),
        ],
        generated_key: true,
    };

    fn key(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int(self.id)]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Text(self.name.clone()), SqlValue::Int(self.kind)]
    }

    fn from_row(row: Vec<SqlValue>) -> Result<Self, AppError> {
        let mut r = RowReader::new(Self::SPEC, row)?;
        Ok(Object {
            id: r.int()?,
            name: r.text()?,
            kind: r.int()?,
        })
    }

    fn set_generated_key(&mut self, id: i32) {
        self.id = id;
    }
}

impl Record for Well {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "wells",
        key: &[Column::new("well", ColumnKind::Int)],
        values: &[
            Column::new("ngdu", ColumnKind::Int),
            Column::new("cdng", ColumnKind::Int),
            Column::new("kust", ColumnKind::Int),
            Column::new("mest", ColumnKind::Int),
        ],
        generated_key: false,
    };

    fn key(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int(self.well)]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.ngdu),
            SqlValue::Int(self.cdng),
            SqlValue::Int(self.kust),
            SqlValue::Int(self.mest),
        ]
    }

    fn from_row(row: Vec<SqlValue>) -> Result<Self, AppError> {
        let mut r = RowReader::new(Self::SPEC, row)?;
        Ok(Well {
            well: r.int()?,
            ngdu: r.int()?,
            cdng: r.int()?,
            kust: r.int()?,
            mest: r.int()?,
        })
    }
}

impl Record for WellDayHistory {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "well_day_histories",
        key: &[
            Column::new("well", ColumnKind::Int),
            Column::new("date_fact", ColumnKind::Date),
        ],
        values: DAY_MEASUREMENTS,
        generated_key: false,
    };

    fn key(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int(self.well), SqlValue::Date(self.date_fact)]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Float(self.debit),
            SqlValue::Float(self.ee_consume),
            SqlValue::Float(self.expenses),
            SqlValue::Float(self.pump_operating),
        ]
    }

    fn from_row(row: Vec<SqlValue>) -> Result<Self, AppError> {
        let mut r = RowReader::new(Self::SPEC, row)?;
        Ok(WellDayHistory {
            well: r.int()?,
            date_fact: r.date()?,
            debit: r.float()?,
            ee_consume: r.float()?,
            expenses: r.float()?,
            pump_operating: r.float()?,
        })
    }
}

impl Record for WellDayPlan {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "well_day_plans",
        key: &[
            Column::new("well", ColumnKind::Int),
            Column::new("date_plan", ColumnKind::Date),
        ],
        values: DAY_MEASUREMENTS,
        generated_key: false,
    };

    fn key(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int(self.well), SqlValue::Date(self.date_plan)]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Float(self.debit),
            SqlValue::Float(self.ee_consume),
            SqlValue::Float(self.expenses),
            SqlValue::Float(self.pump_operating),
        ]
    }

    fn from_row(row: Vec<SqlValue>) -> Result<Self, AppError> {
        let mut r = RowReader::new(Self::SPEC, row)?;
        Ok(WellDayPlan {
            well: r.int()?,
            date_plan: r.date()?,
            debit: r.float()?,
            ee_consume: r.float()?,
            expenses: r.float()?,
            pump_operating: r.float()?,
        })
    }
}

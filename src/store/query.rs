//! Query Descriptor Module
//!
//! Backend-neutral description of a single-table select: predicates,
//! ordering, and a row limit. Tables and fields are closed sets so that the
//! SQL renderer never interpolates caller text.

use std::fmt;

/// Rows returned by every read endpoint.
pub const RESULT_LIMIT: u32 = 20;

// == Table ==
/// Monitored tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    SolarPlants,
    Products,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::SolarPlants => "solar_plants",
            Table::Products => "products",
        }
    }

    /// Whether `field` is a numeric column of this table.
    pub fn has_numeric_field(&self, field: Field) -> bool {
        matches!(
            (self, field),
            (Table::SolarPlants, Field::Id | Field::Kw | Field::Temp)
                | (Table::Products, Field::Id | Field::Purchases)
        )
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Field ==
/// Numeric columns usable in predicates and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Kw,
    Temp,
    Purchases,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Kw => "kw",
            Field::Temp => "temp",
            Field::Purchases => "purchases",
        }
    }
}

// == Comparator ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparator {
    pub fn sql(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
        }
    }

    pub fn matches(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Eq => lhs == rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Lte => lhs <= rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Gte => lhs >= rhs,
        }
    }
}

/// One `field comparator value` filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicate {
    pub field: Field,
    pub comparator: Comparator,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// == Query Descriptor ==
/// An immutable single-table select.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    table: Table,
    predicates: Vec<Predicate>,
    order_by: Field,
    direction: SortDirection,
    limit: u32,
}

impl QueryDescriptor {
    /// Starts a descriptor with no predicates, sorted by `order_by`
    /// descending and capped at [`RESULT_LIMIT`].
    pub fn new(table: Table, order_by: Field) -> Self {
        Self {
            table,
            predicates: Vec::new(),
            order_by,
            direction: SortDirection::Desc,
            limit: RESULT_LIMIT,
        }
    }

    pub fn filter(mut self, field: Field, comparator: Comparator, value: f64) -> Self {
        self.predicates.push(Predicate {
            field,
            comparator,
            value,
        });
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order_by(&self) -> Field {
        self.order_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    pub fn row_limit(&self) -> u32 {
        self.limit
    }

    /// Renders the `WHERE ... ORDER BY ... LIMIT ...` tail of a select.
    ///
    /// Predicate values are bound as `$1..$n` float8 parameters, returned in
    /// order alongside the SQL text.
    pub fn sql_tail(&self) -> (String, Vec<f64>) {
        let mut sql = String::new();
        let mut params = Vec::with_capacity(self.predicates.len());

        for (i, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!(
                "{} {} ${}::float8",
                predicate.field.name(),
                predicate.comparator.sql(),
                i + 1
            ));
            params.push(predicate.value);
        }

        sql.push_str(&format!(
            " ORDER BY {} {} LIMIT {}",
            self.order_by.name(),
            self.direction.sql(),
            self.limit
        ));

        (sql, params)
    }
}

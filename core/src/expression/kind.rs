//! Names of the built-in functions.

pub const CONSTANT: &str = "constant";
pub const ACCESSOR: &str = "accessor";
pub const ELEMENT: &str = "element";

// Math
pub const ADD: &str = "+";
pub const SUBTRACT: &str = "-";
pub const MULTIPLY: &str = "*";
pub const DIVIDE: &str = "/";
pub const MOD: &str = "%";
pub const POWER: &str = "^";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const SUM: &str = "sum";
pub const AVERAGE: &str = "average";
pub const ABS: &str = "abs";
pub const FLOOR: &str = "floor";
pub const CEILING: &str = "ceiling";
pub const ROUND: &str = "round";

// Comparison and logic
pub const EQUAL: &str = "==";
pub const NOT_EQUAL: &str = "!=";
pub const LESS_THAN: &str = "<";
pub const LESS_THAN_OR_EQUAL: &str = "<=";
pub const GREATER_THAN: &str = ">";
pub const GREATER_THAN_OR_EQUAL: &str = ">=";
pub const AND: &str = "&&";
pub const OR: &str = "||";
pub const NOT: &str = "!";
pub const IF: &str = "if";
pub const EXISTS: &str = "exists";
pub const COALESCE: &str = "coalesce";

// Strings
pub const CONCAT: &str = "concat";
pub const LENGTH: &str = "length";
pub const TO_LOWER: &str = "toLower";
pub const TO_UPPER: &str = "toUpper";
pub const TRIM: &str = "trim";
pub const SUBSTRING: &str = "substring";
pub const STARTS_WITH: &str = "startsWith";
pub const ENDS_WITH: &str = "endsWith";
pub const REPLACE: &str = "replace";

// Conversion
pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const STRING: &str = "string";
pub const BOOL: &str = "bool";
pub const TICKS_TO_DAYS: &str = "ticksToDays";
pub const TICKS_TO_HOURS: &str = "ticksToHours";
pub const TICKS_TO_MINUTES: &str = "ticksToMinutes";

// Date and time
pub const TICKS: &str = "ticks";
pub const ADD_DAYS: &str = "addDays";
pub const ADD_HOURS: &str = "addHours";
pub const DAY_OF_MONTH: &str = "dayOfMonth";
pub const DAY_OF_WEEK: &str = "dayOfWeek";
pub const YEAR: &str = "year";
pub const DATE_DIFF_TICKS: &str = "dateDiffTicks";

// Collections
pub const CREATE_ARRAY: &str = "createArray";
pub const COUNT: &str = "count";
pub const CONTAINS: &str = "contains";
pub const FIRST: &str = "first";
pub const LAST: &str = "last";
pub const JOIN: &str = "join";
pub const GET_PROPERTY: &str = "getProperty";
pub const FOREACH: &str = "foreach";
pub const WHERE: &str = "where";

/// Operators rendered in infix form by `Display`.
pub(crate) fn is_infix(kind: &str) -> bool {
    matches!(
        kind,
        ADD | SUBTRACT
            | MULTIPLY
            | DIVIDE
            | MOD
            | POWER
            | EQUAL
            | NOT_EQUAL
            | LESS_THAN
            | LESS_THAN_OR_EQUAL
            | GREATER_THAN
            | GREATER_THAN_OR_EQUAL
            | AND
            | OR
    )
}

pub mod d400_month_on_month;
pub mod d401_year_on_year;

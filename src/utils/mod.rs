pub mod attendance_gen;
pub mod payroll_gen;

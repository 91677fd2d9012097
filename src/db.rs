use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::api::attendance::AttendanceAction;
use crate::error::ServiceError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, LeaveBalance};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

/// The system's only "database": a seeded employee list plus the state the
/// facade is allowed to mutate (attendance marks, leave requests, leave
/// balances). Everything else is regenerated on read.
pub struct MockDb {
    employees: RwLock<Vec<Employee>>,
    /// At most one record per (employee, day); the key is the constraint.
    marks: RwLock<HashMap<(u64, NaiveDate), AttendanceRecord>>,
    leave_requests: RwLock<Vec<LeaveRequest>>,
}

impl MockDb {
    /// Build the store with the stock employee roster and, per employee, one
    /// approved past sick leave and one pending upcoming casual leave
    /// relative to `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let employees = seed_employees();

        let leave_requests = employees
            .iter()
            .flat_map(|e| seed_leave_requests(e.id, today))
            .collect::<Vec<_>>();

        log::info!(
            "Mock store seeded: {} employees, {} leave requests",
            employees.len(),
            leave_requests.len()
        );

        Self {
            employees: RwLock::new(employees),
            marks: RwLock::new(HashMap::new()),
            leave_requests: RwLock::new(leave_requests),
        }
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.employees.read().expect("employee lock poisoned").clone()
    }

    pub fn employee(&self, id: u64) -> Option<Employee> {
        self.employees
            .read()
            .expect("employee lock poisoned")
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// The stored check-in/check-out record for one (employee, day), if any.
    pub fn mark(&self, employee_id: u64, date: NaiveDate) -> Option<AttendanceRecord> {
        self.marks
            .read()
            .expect("attendance lock poisoned")
            .get(&(employee_id, date))
            .cloned()
    }

    /// Merge a check-in or check-out into the single record for
    /// (employee, today). Duplicate actions for the same direction, and a
    /// check-out with no prior check-in, are conflicts.
    pub fn apply_mark(
        &self,
        employee_id: u64,
        now: NaiveDateTime,
        action: AttendanceAction,
        photo: &str,
    ) -> Result<AttendanceRecord, ServiceError> {
        let date = now.date();
        let mut marks = self.marks.write().expect("attendance lock poisoned");

        match action {
            AttendanceAction::CheckIn => {
                if let Some(record) = marks.get(&(employee_id, date)) {
                    if record.check_in_time.is_some() {
                        return Err(ServiceError::conflict("already checked in today"));
                    }
                }
                let record = AttendanceRecord {
                    id: AttendanceRecord::record_id(employee_id, date),
                    employee_id,
                    date,
                    check_in_time: Some(now),
                    check_out_time: None,
                    check_in_photo: Some(photo.to_string()),
                    check_out_photo: None,
                    status: AttendanceStatus::Present,
                };
                marks.insert((employee_id, date), record.clone());
                Ok(record)
            }
            AttendanceAction::CheckOut => {
                let record = marks
                    .get_mut(&(employee_id, date))
                    .filter(|r| r.check_in_time.is_some())
                    .ok_or_else(|| {
                        ServiceError::conflict("no active check-in found for today")
                    })?;
                if record.check_out_time.is_some() {
                    return Err(ServiceError::conflict("already checked out today"));
                }
                record.check_out_time = Some(now);
                record.check_out_photo = Some(photo.to_string());
                Ok(record.clone())
            }
        }
    }

    pub fn leave_requests_for(&self, employee_id: u64) -> Vec<LeaveRequest> {
        let mut requests: Vec<_> = self
            .leave_requests
            .read()
            .expect("leave lock poisoned")
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    pub fn all_leave_requests(&self) -> Vec<LeaveRequest> {
        let mut requests = self
            .leave_requests
            .read()
            .expect("leave lock poisoned")
            .clone();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// True if any approved request for this employee overlaps the range.
    pub fn has_approved_overlap(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> bool {
        self.leave_requests
            .read()
            .expect("leave lock poisoned")
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Approved)
            .any(|r| r.start_date <= end && start <= r.end_date)
    }

    pub fn insert_leave_request(&self, request: LeaveRequest) {
        self.leave_requests
            .write()
            .expect("leave lock poisoned")
            .push(request);
    }

    /// pending -> approved, decrementing the matching balance counter by the
    /// request's inclusive day count. Serialized by the write lock; the
    /// status is re-checked under it.
    pub fn approve_leave(&self, leave_id: &str) -> Result<LeaveRequest, ServiceError> {
        let mut requests = self.leave_requests.write().expect("leave lock poisoned");

        let request = requests
            .iter_mut()
            .find(|r| r.id == leave_id)
            .ok_or_else(|| ServiceError::not_found("leave request", leave_id))?;

        if request.status != LeaveStatus::Pending {
            return Err(ServiceError::conflict("leave request already processed"));
        }

        if request.leave_type != LeaveType::Unpaid {
            let days = request.days();
            let mut employees = self.employees.write().expect("employee lock poisoned");
            let employee = employees
                .iter_mut()
                .find(|e| e.id == request.employee_id)
                .ok_or_else(|| ServiceError::not_found("employee", request.employee_id))?;

            let balance = balance_for(&mut employee.leave_balance, request.leave_type);
            if *balance < days {
                return Err(ServiceError::validation("insufficient leave balance"));
            }
            *balance -= days;
        }

        request.status = LeaveStatus::Approved;
        Ok(request.clone())
    }

    /// pending -> rejected; balances stay untouched.
    pub fn reject_leave(&self, leave_id: &str) -> Result<LeaveRequest, ServiceError> {
        let mut requests = self.leave_requests.write().expect("leave lock poisoned");

        let request = requests
            .iter_mut()
            .find(|r| r.id == leave_id)
            .ok_or_else(|| ServiceError::not_found("leave request", leave_id))?;

        if request.status != LeaveStatus::Pending {
            return Err(ServiceError::conflict("leave request already processed"));
        }

        request.status = LeaveStatus::Rejected;
        Ok(request.clone())
    }
}

fn balance_for(balance: &mut LeaveBalance, leave_type: LeaveType) -> &mut u32 {
    match leave_type {
        LeaveType::Sick => &mut balance.sick,
        LeaveType::Casual => &mut balance.casual,
        LeaveType::Paid => &mut balance.paid,
        LeaveType::Unpaid => unreachable!("unpaid leave has no balance counter"),
    }
}

fn seed_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: 2,
            name: "John Employee".to_string(),
            email: "employee@salarybox.com".to_string(),
            position: "Software Developer".to_string(),
            department: "Engineering".to_string(),
            salary: 50000.0,
            joining_date: NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid seed date"),
            leave_balance: LeaveBalance {
                sick: 10,
                casual: 7,
                paid: 15,
            },
        },
        Employee {
            id: 3,
            name: "Alice Johnson".to_string(),
            email: "alice@salarybox.com".to_string(),
            position: "UI Designer".to_string(),
            department: "Design".to_string(),
            salary: 48000.0,
            joining_date: NaiveDate::from_ymd_opt(2023, 3, 10).expect("valid seed date"),
            leave_balance: LeaveBalance {
                sick: 8,
                casual: 5,
                paid: 12,
            },
        },
        Employee {
            id: 4,
            name: "Bob Smith".to_string(),
            email: "bob@salarybox.com".to_string(),
            position: "Marketing Specialist".to_string(),
            department: "Marketing".to_string(),
            salary: 45000.0,
            joining_date: NaiveDate::from_ymd_opt(2023, 2, 20).expect("valid seed date"),
            leave_balance: LeaveBalance {
                sick: 10,
                casual: 6,
                paid: 14,
            },
        },
        Employee {
            id: 5,
            name: "Emily Davis".to_string(),
            email: "emily@salarybox.com".to_string(),
            position: "HR Coordinator".to_string(),
            department: "Human Resources".to_string(),
            salary: 47000.0,
            joining_date: NaiveDate::from_ymd_opt(2023, 1, 5).expect("valid seed date"),
            leave_balance: LeaveBalance {
                sick: 9,
                casual: 7,
                paid: 15,
            },
        },
    ]
}

fn seed_leave_requests(employee_id: u64, today: NaiveDate) -> Vec<LeaveRequest> {
    vec![
        LeaveRequest {
            id: Uuid::new_v4().to_string(),
            employee_id,
            start_date: today - Duration::days(20),
            end_date: today - Duration::days(18),
            leave_type: LeaveType::Sick,
            reason: "Fever and cold".to_string(),
            status: LeaveStatus::Approved,
            created_at: today - Duration::days(25),
        },
        LeaveRequest {
            id: Uuid::new_v4().to_string(),
            employee_id,
            start_date: today + Duration::days(5),
            end_date: today + Duration::days(7),
            leave_type: LeaveType::Casual,
            reason: "Family function".to_string(),
            status: LeaveStatus::Pending,
            created_at: today - Duration::days(2),
        },
    ]
}

use crate::infra::{
    parse_date, sample_registration_form, InMemoryProfileRepository, InMemoryRosterRepository,
    InMemoryStaffRequestRepository,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use graduate_corps::error::AppError;
use graduate_corps::workflows::registration::domain::DepartmentId;
use graduate_corps::workflows::registration::service::{
    DepartmentAssignment, RegistrationService, StatusChange,
};
use graduate_corps::workflows::registration::status::ApplicationStatus;
use graduate_corps::workflows::roster::domain::{columns, Gender, RawRow, ZoneId};
use graduate_corps::workflows::roster::importer::RosterCsvImporter;
use graduate_corps::workflows::roster::ingest::{IngestionReport, RosterIngestion};
use graduate_corps::workflows::roster::repository::RosterQuery;
use graduate_corps::workflows::staffing::domain::{
    StaffRequestDraft, StaffRequestStatus, UrgencyTier,
};
use graduate_corps::workflows::staffing::service::StaffingService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct IngestArgs {
    /// Zone identifier that owns the uploaded roster
    #[arg(long)]
    pub(crate) zone: String,
    /// Path to the roster CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let rows = RosterCsvImporter::from_path(&args.csv)?;
    let repository = Arc::new(InMemoryRosterRepository::default());
    let ingestion = RosterIngestion::new(repository);

    match ingestion.ingest(&ZoneId(args.zone), rows) {
        Ok(report) => render_ingestion_report(&report),
        Err(error) => println!("Roster store unavailable: {error}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Graduate corps portal demo (evaluated {today})");

    let roster_repository = Arc::new(InMemoryRosterRepository::default());
    let profile_repository = Arc::new(InMemoryProfileRepository::default());
    let request_repository = Arc::new(InMemoryStaffRequestRepository::default());

    let ingestion = RosterIngestion::new(roster_repository.clone());
    let staffing = Arc::new(StaffingService::new(request_repository));
    let registration =
        RegistrationService::new(roster_repository, profile_repository, staffing.clone());

    let zone = ZoneId("zone-lagos-1".to_string());
    println!("\nRoster upload for {}", zone.0);
    let report = match ingestion.ingest(&zone, demo_batch()) {
        Ok(report) => report,
        Err(error) => {
            println!("  Roster store unavailable: {error}");
            return Ok(());
        }
    };
    render_ingestion_report(&report);

    let query = RosterQuery {
        zone_id: zone,
        surname: "Doe".to_string(),
        gender: Gender::Male,
        phone_number: "+2348012345678".to_string(),
    };
    println!(
        "\nClaim search: surname {} / {} / {}",
        query.surname,
        query.gender.label(),
        query.phone_number
    );
    let matches = match registration.search(&query) {
        Ok(matches) => matches,
        Err(error) => {
            println!("  Search unavailable: {error}");
            return Ok(());
        }
    };
    for row in &matches {
        println!(
            "- {} {} {} ({}) | claimed: {}",
            row.id.0, row.first_name, row.surname, row.university, row.claimed
        );
    }
    let Some(target) = matches.first() else {
        println!("  No uploaded record matched; nothing to claim");
        return Ok(());
    };

    let graduate = match registration.register(&target.id, sample_registration_form()) {
        Ok(profile) => profile,
        Err(error) => {
            println!("  Registration rejected: {error}");
            return Ok(());
        }
    };
    println!(
        "\nBound {} to roster row {} -> status {}",
        graduate.id.0,
        graduate.roster_row_id.0,
        graduate.status.label()
    );

    let request = match staffing.create(StaffRequestDraft {
        department_id: DepartmentId("media".to_string()),
        position: "Camera Operator".to_string(),
        description: "Sunday service production".to_string(),
        number_of_staff: 2,
        urgency: UrgencyTier::Immediate,
        gender_preference: None,
    }) {
        Ok(request) => request,
        Err(error) => {
            println!("  Staff request rejected: {error}");
            return Ok(());
        }
    };
    if let Err(error) = staffing.set_review_status(&request.id, StaffRequestStatus::Approved) {
        println!("  Staff request approval failed: {error}");
        return Ok(());
    }
    println!(
        "Opened staff request {} for {} ({} needed)",
        request.id.0, request.position, request.number_of_staff
    );

    for target in [
        ApplicationStatus::InvitedForInterview,
        ApplicationStatus::Interviewed,
        ApplicationStatus::Sighting,
    ] {
        match registration.transition(
            &graduate.id,
            StatusChange {
                target,
                assignment: None,
                effective_on: today,
            },
        ) {
            Ok(profile) => println!("- Review step: {}", profile.status.label()),
            Err(error) => {
                println!("  Review step failed: {error}");
                return Ok(());
            }
        }
    }

    let serving = match registration.transition(
        &graduate.id,
        StatusChange {
            target: ApplicationStatus::Serving,
            assignment: Some(DepartmentAssignment {
                department_id: DepartmentId("media".to_string()),
                staff_request_id: Some(request.id.clone()),
            }),
            effective_on: today,
        },
    ) {
        Ok(profile) => profile,
        Err(error) => {
            println!("  Placement failed: {error}");
            return Ok(());
        }
    };
    println!(
        "- Review step: {} (department {}, started {})",
        serving.status.label(),
        serving
            .service_department_id
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("unassigned"),
        serving
            .service_started_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "pending".to_string())
    );

    match serde_json::to_string_pretty(&serving.status_view(today)) {
        Ok(json) => println!("\nPublic graduate payload:\n{json}"),
        Err(error) => println!("  Public graduate payload unavailable: {error}"),
    }

    match staffing.get(&request.id) {
        Ok(request) => {
            let view = request.status_view();
            println!(
                "\nStaff request {}: {}/{} filled -> {}",
                view.request_id.0, view.fulfilled_count, view.number_of_staff, view.status
            );
        }
        Err(error) => println!("  Staff request lookup failed: {error}"),
    }

    match staffing.release_fulfillment(&request.id) {
        Ok(request) => println!(
            "After one release: {}/{} filled -> {}",
            request.fulfilled_count,
            request.number_of_staff,
            request.status.label()
        ),
        Err(error) => println!("  Release refused: {error}"),
    }

    Ok(())
}

fn render_ingestion_report(report: &IngestionReport) {
    println!(
        "Summary: {} rows | {} accepted | {} rejected",
        report.summary.total_rows, report.summary.accepted, report.summary.rejected
    );
    for row in &report.accepted {
        println!("- accepted {}: {} {}", row.id.0, row.first_name, row.surname);
    }
    for rejected in &report.rejected {
        println!(
            "- rejected row {}: {}",
            rejected.row_index,
            rejected.errors.join("; ")
        );
    }
}

fn demo_row(first_name: &str, surname: &str, gender: &str, phone: &str) -> RawRow {
    let mut row = RawRow::new();
    row.insert(columns::FIRST_NAME.to_string(), first_name.to_string());
    row.insert(columns::SURNAME.to_string(), surname.to_string());
    row.insert(columns::GENDER.to_string(), gender.to_string());
    row.insert(columns::PHONE_NUMBER.to_string(), phone.to_string());
    row.insert(
        columns::UNIVERSITY.to_string(),
        "University of Jos".to_string(),
    );
    row.insert(columns::COURSE.to_string(), "Accounting".to_string());
    row.insert(columns::GRADUATION_YEAR.to_string(), "2024".to_string());
    row.insert(
        columns::FELLOWSHIP.to_string(),
        "Campus Fellowship".to_string(),
    );
    row.insert(columns::ZONAL_PASTOR.to_string(), "Pastor A. Obi".to_string());
    row.insert(
        columns::CHAPTER_PASTOR_NAME.to_string(),
        "Pastor E. Bello".to_string(),
    );
    row.insert(
        columns::CHAPTER_PASTOR_PHONE.to_string(),
        "+2348025551234".to_string(),
    );
    row.insert(
        columns::CHAPTER_PASTOR_EMAIL.to_string(),
        "e.bello@chapter.org".to_string(),
    );
    row
}

fn demo_batch() -> Vec<RawRow> {
    vec![
        demo_row("John", "Doe", "MALE", "+2348012345678"),
        demo_row("Ada", "Eze", "F", "+2348011112222"),
        demo_row("Ruth", "Okafor", "FEMALE", "+2348033334444"),
    ]
}

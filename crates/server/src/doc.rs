use crate::{
    dtos::{
        classroom::{ClassroomResponse, DayAvailabilityResponse},
        enrollment::{EnrollRequest, EnrollmentResponse},
        schedule::{CreateScheduleRequest, ScheduleEntryDto, ScheduleResponse},
        section::SectionResponse,
        semester::{CurrentSemesterResponse, SemesterResponse, WeekRangeResponse},
        timetable::{RenderBlockResponse, TimetableResponse},
    },
    error::ErrorBody,
    routes::{classroom, enrollment, health, schedule, section, semester, timetable},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        semester::list_semesters,
        semester::current_semester,
        semester::activate_semester,
        semester::week_range,
        timetable::get_timetable,
        section::list_sections,
        classroom::list_classrooms,
        classroom::empty_classrooms,
        schedule::create_schedule,
        enrollment::list_enrollments,
        enrollment::enroll,
        enrollment::withdraw
    ),
    components(schemas(
        ErrorBody,
        SemesterResponse,
        CurrentSemesterResponse,
        WeekRangeResponse,
        SectionResponse,
        ClassroomResponse,
        DayAvailabilityResponse,
        ScheduleEntryDto,
        CreateScheduleRequest,
        ScheduleResponse,
        EnrollRequest,
        EnrollmentResponse,
        RenderBlockResponse,
        TimetableResponse
    )),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Semesters", description = "Semester and week related endpoints"),
        (name = "Timetable", description = "Weekly grid and schedule endpoints"),
        (name = "Classrooms", description = "Classroom availability endpoints"),
        (name = "Enrollments", description = "Student enrollment endpoints"),
    ),
    info(
        title = "Timetable API",
        version = "1.0.0",
        description = "Course timetable API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

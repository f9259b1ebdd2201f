use crate::types::assessment::{Factor, RiskAssessment};
use crate::types::context::MealContext;
use crate::types::report::{PredictionReport, Priority, Recommendation};

pub fn recommend(assessment: &RiskAssessment) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Vec::new();
    let mut push = |recommendation: Recommendation| {
        if !recommendations.iter().any(|r| r.id == recommendation.id) {
            recommendations.push(recommendation);
        }
    };

    for factor in &assessment.contributing_factors {
        match factor {
            Factor::LowBookingRate | Factor::ModerateBookingRate => push(Recommendation::new(
                "rec.portion.dynamic",
                "Dynamic Portion Sizing",
                "Implement dynamic portion sizing based on daily attendance predictions.",
                Priority::High,
                "15-20%",
            )),
            Factor::Weekend => push(Recommendation::new(
                "rec.booking.weekend",
                "Weekend Advance Booking",
                "Establish a weekend advance booking system, closing 24 hours ahead.",
                Priority::Medium,
                "25-30%",
            )),
            Factor::DinnerService => push(Recommendation::new(
                "rec.dinner.survey",
                "Dinner Preference Survey",
                "Survey students about dinner preferences and timing.",
                Priority::High,
                "10-15%",
            )),
            Factor::BreakfastService => push(Recommendation::new(
                "rec.feedback.meals",
                "Meal Feedback Loop",
                "Create a student feedback system for meal preferences.",
                Priority::Medium,
                "10-15%",
            )),
            Factor::HostelPattern => push(Recommendation::new(
                "rec.hostel.portion_control",
                "Hostel Portion Control",
                "Apply the portion control measures used at other hostels.",
                Priority::Medium,
                "15-20%",
            )),
            Factor::SpecialEvent | Factor::BadWeather | Factor::NormalConditions => {}
        }
    }

    if assessment.is_high_risk() {
        push(Recommendation::new(
            "rec.staff.training",
            "Kitchen Staff Training",
            "Train kitchen staff on waste monitoring best practices.",
            Priority::Low,
            "5-10%",
        ));
    }

    recommendations
}

pub fn prediction_report(context: MealContext, assessment: RiskAssessment) -> PredictionReport {
    let recommendations = recommend(&assessment);
    let mut report = PredictionReport {
        context,
        assessment,
        recommendations,
    };
    report.sort_recommendations();
    report
}

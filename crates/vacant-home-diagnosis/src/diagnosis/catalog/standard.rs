use std::collections::BTreeMap;

use super::{AnswerOption, Discriminant, Question, ResultCategory, ResultPayload};

fn option(text: &str, value: Discriminant, score: &[(&str, i32)]) -> AnswerOption {
    AnswerOption {
        text: text.to_string(),
        value,
        score: score
            .iter()
            .map(|(key, delta)| (key.to_string(), *delta))
            .collect(),
    }
}

fn question(id: u32, text: &str, options: [AnswerOption; 4]) -> Question {
    Question {
        id,
        text: text.to_string(),
        options: options.into(),
    }
}

// Best-option sums per question add up to 55, the default risk scale maximum.
pub(super) fn standard_questions() -> Vec<Question> {
    use Discriminant::{A, B, C, D};

    vec![
        question(
            1,
            "How long has the house been empty?",
            [
                option("Someone still lives there, or less than six months", A, &[]),
                option("Six months to a year", B, &[("U", 1)]),
                option("One to three years", C, &[("U", 2), ("B", 1)]),
                option("More than three years", D, &[("U", 3)]),
            ],
        ),
        question(
            2,
            "How often does someone visit the house?",
            [
                option("At least once a month", A, &[]),
                option("A few times a year", B, &[("B", 1)]),
                option("About once a year", C, &[("U", 1), ("B", 1)]),
                option("Hardly ever", D, &[("U", 2), ("B", 1)]),
            ],
        ),
        question(
            3,
            "How far is the house from where you live?",
            [
                option("Within 30 minutes", A, &[]),
                option("One to two hours", B, &[("B", 1)]),
                option("More than two hours", C, &[("B", 2)]),
                option("A flight or overnight trip away", D, &[("B", 3)]),
            ],
        ),
        question(
            4,
            "What is the situation of the parent who owned the house?",
            [
                option("Healthy and living elsewhere", A, &[]),
                option("Living in a care facility", B, &[("U", 1), ("L", 1)]),
                option("Has passed away", C, &[("L", 2)]),
                option("Living with dementia", D, &[("U", 1), ("L", 3)]),
            ],
        ),
        question(
            5,
            "Whose name is the property registered under?",
            [
                option("Already transferred to me or a sibling", A, &[]),
                option("A parent who has passed away", B, &[("L", 3)]),
                option("A grandparent or older, or nobody knows", C, &[("L", 4)]),
                option("A living parent", D, &[("L", 1)]),
            ],
        ),
        question(
            6,
            "How many heirs share a claim to the house?",
            [
                option("Only me", A, &[]),
                option("Two", B, &[("L", 1)]),
                option("Three or more", C, &[("L", 2)]),
                option("Unknown, or some cannot be contacted", D, &[("L", 3)]),
            ],
        ),
        question(
            7,
            "Has the family agreed on what to do with the house?",
            [
                option("Yes, we agree", A, &[]),
                option("We have not talked about it", B, &[("L", 1)]),
                option("Opinions are split", C, &[("U", 1), ("L", 2)]),
                option("There is an open dispute", D, &[("U", 1), ("L", 3)]),
            ],
        ),
        question(
            8,
            "How heavy are the yearly property tax and upkeep costs?",
            [
                option("Barely noticeable", A, &[]),
                option("Manageable", B, &[("B", 1)]),
                option("A real strain", C, &[("B", 2)]),
                option("Hard to keep paying", D, &[("U", 1), ("B", 3)]),
            ],
        ),
        question(
            9,
            "What state are the garden and surroundings in?",
            [
                option("Kept tidy", A, &[]),
                option("Some weeds", B, &[("B", 1)]),
                option("Overgrown", C, &[("U", 1), ("B", 2)]),
                option("Neighbours have complained", D, &[("U", 2), ("B", 2)]),
            ],
        ),
        question(
            10,
            "What condition is the building in?",
            [
                option("Good", A, &[]),
                option("Some wear and tear", B, &[("B", 1)]),
                option("Leaks or visible damage", C, &[("U", 1), ("B", 2)]),
                option("Parts are at risk of collapse", D, &[("U", 2), ("B", 2)]),
            ],
        ),
        question(
            11,
            "How much furniture and belongings are still inside?",
            [
                option("Already cleared", A, &[]),
                option("Some", B, &[("B", 1)]),
                option("A lot", C, &[("B", 2)]),
                option("Untouched since it was lived in", D, &[("B", 3)]),
            ],
        ),
        question(
            12,
            "Has the municipality contacted you about the house?",
            [
                option("No", A, &[]),
                option("An inquiry about its condition", B, &[("U", 2)]),
                option("Formal advice or guidance", C, &[("U", 3)]),
                option("A recommendation or order to act", D, &[("U", 3)]),
            ],
        ),
        question(
            13,
            "Where is the house located?",
            [
                option("Near a station or town centre", A, &[("V", 5)]),
                option("A suburban residential area", B, &[("V", 3)]),
                option("A rural area", C, &[("V", 1)]),
                option("A remote area", D, &[]),
            ],
        ),
        question(
            14,
            "How old is the building?",
            [
                option("Less than 20 years", A, &[("V", 4)]),
                option("20 to 40 years", B, &[("V", 1)]),
                option("More than 40 years", C, &[]),
                option("Nobody knows", D, &[("L", 1)]),
            ],
        ),
        question(
            15,
            "What would you like to do with the house?",
            [
                option("Keep it and use or renovate it", A, &[("V", 4)]),
                option("Rent it out", B, &[("V", 3)]),
                option("Sell it", C, &[("V", 1)]),
                option("Undecided", D, &[("U", 1)]),
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn payload(
    label: &str,
    headline: &str,
    sub_copy: &str,
    why_now: &str,
    risk: &str,
    actions: &[&str],
    supplement: &str,
    cta_text: &str,
) -> ResultPayload {
    ResultPayload {
        label: label.to_string(),
        headline: headline.to_string(),
        sub_copy: sub_copy.to_string(),
        why_now: why_now.to_string(),
        risk: risk.to_string(),
        actions: actions.iter().map(|action| action.to_string()).collect(),
        supplement: supplement.to_string(),
        cta_text: cta_text.to_string(),
    }
}

pub(super) fn standard_results() -> BTreeMap<ResultCategory, ResultPayload> {
    let mut results = BTreeMap::new();

    results.insert(
        ResultCategory::A,
        payload(
            "TYPE A: Ready to move",
            "You are in a good position to decide and act.",
            "Ownership is clear and the house is in reasonable shape, so a sale or handover can move quickly.",
            "Prices for empty houses fall every year they stay empty; acting while the building is sound keeps options open.",
            "Waiting turns a saleable house into one that needs repairs or demolition before anyone will buy it.",
            &[
                "Get a free valuation from two or three local agents.",
                "Agree a target price and timeline with the family.",
                "Collect the title deed and tax notices in one place.",
            ],
            "Capital gains relief for inherited empty homes usually requires selling within a fixed window after inheritance.",
            "Request a free valuation",
        ),
    );
    results.insert(
        ResultCategory::B,
        payload(
            "TYPE B: Burden overload",
            "The cost and effort of keeping the house is wearing you down.",
            "Distance, upkeep and the state of the building add up to a load that grows every season.",
            "Every winter and rainy season accelerates damage that is expensive to undo.",
            "Falling roof tiles or overgrown trees can make you liable for damage to neighbours.",
            &[
                "Book a property management or inspection visit.",
                "Get quotes for clearing belongings and garden work.",
                "Compare the yearly holding cost with the expected sale price.",
            ],
            "Clearing contents is often the first step that unblocks every other option.",
            "Talk to a management specialist",
        ),
    );
    results.insert(
        ResultCategory::C,
        payload(
            "TYPE C: Rights first",
            "Ownership and family agreement need to be settled before anything else.",
            "Nobody can sell, rent or demolish the house until the title reflects who owns it now.",
            "Registration of inherited property is mandatory, and the number of heirs grows with each generation.",
            "Unregistered inheritance can lead to fines and makes any later transaction far slower.",
            &[
                "Obtain the current certified copy of the property register.",
                "List every legal heir and how to contact them.",
                "Consult a judicial scrivener or lawyer about registration.",
            ],
            "A written agreement among heirs avoids disputes once a buyer appears.",
            "Book a legal consultation",
        ),
    );
    results.insert(
        ResultCategory::D,
        payload(
            "TYPE D: Hidden value",
            "The house still has value you could put to work.",
            "Location and condition make renting, renovating or reuse a realistic option.",
            "Demand for well-located older homes is strong while the building remains usable.",
            "Left empty, the same house loses the condition that makes it rentable.",
            &[
                "Ask for a rental demand estimate for the area.",
                "Get a renovation quote focused on water, roof and wiring.",
                "Check local subsidies for empty-house renovation.",
            ],
            "Many municipalities run empty-house banks that match owners with new residents.",
            "Explore rental and reuse options",
        ),
    );
    results.insert(
        ResultCategory::E,
        payload(
            "TYPE E: Act now",
            "The house needs attention immediately.",
            "The combination of neglect and outside pressure means the situation can escalate quickly.",
            "Municipal orders remove tax relief on the land and can end in enforced demolition at your cost.",
            "Being designated as a hazardous empty house can multiply the land tax several times over.",
            &[
                "Reply to any municipal notice before its deadline.",
                "Arrange an urgent safety inspection.",
                "Decide this month who in the family is responsible.",
            ],
            "Urgent cases are handled first; have the notice and the title details ready when you call.",
            "Get urgent help today",
        ),
    );

    results
}

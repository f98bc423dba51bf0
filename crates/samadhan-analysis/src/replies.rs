//! Canned replies used when no model produced a response.

use crate::language::base_language;
use rand::seq::SliceRandom;
use samadhan_types::{Category, Priority, CM_HELPLINE};

fn category_replies(category: Category, language: &str) -> &'static [&'static str] {
    match (category, language) {
        (Category::Other, _) => general_replies(language),
        (Category::Infrastructure, "hi") => &[
            "इस बुनियादी ढांचे की समस्या की रिपोर्ट करने के लिए धन्यवाद। हमने आपकी शिकायत लोक निर्माण विभाग को भेज दी है। अपेक्षित समाधान समय: 3-5 कार्य दिवस।",
            "आपकी बुनियादी ढांचे की चिंता उच्च प्राथमिकता के साथ दर्ज की गई है। हमारी इंजीनियरिंग टीम स्थिति का आकलन करेगी।",
        ],
        (Category::Utilities, "hi") => &[
            "आपकी उपयोगिता सेवा की शिकायत प्राप्त हुई है। जल आपूर्ति विभाग 24-48 घंटों के भीतर इस समस्या की जांच और समाधान करेगा।",
        ],
        (Category::Utilities, _) => &[
            "Your utility service complaint has been received. The Water Supply Department will investigate and resolve this issue within 24-48 hours.",
            "Thank you for reporting this utility issue. Our technical team is aware and will address this matter urgently.",
            "We've logged your utility complaint. Emergency repairs will be prioritized if this affects essential services.",
        ],
        (Category::Traffic, _) => &[
            "Your traffic-related complaint has been forwarded to the Traffic Police Department. They will investigate and take appropriate action within 24 hours.",
            "Thank you for reporting this traffic issue. Our traffic management team will review and implement necessary measures.",
            "We've received your traffic complaint. Safety measures will be evaluated and implemented as needed.",
        ],
        (Category::Environment, _) => &[
            "Your environmental concern has been logged with the Environment Department. An inspection will be conducted within 2-3 business days.",
            "Thank you for reporting this environmental issue. Our environmental team will assess and take corrective action.",
            "We acknowledge your environmental complaint. Pollution control measures will be reviewed and implemented.",
        ],
        (Category::Healthcare, _) => &[
            "Your healthcare complaint has been forwarded to the Healthcare Department. A medical officer will review this matter within 24 hours.",
            "Thank you for bringing this healthcare issue to our attention. Quality assurance measures will be implemented.",
            "We've received your healthcare concern. Patient safety and service quality are our top priorities.",
        ],
        (Category::Education, _) => &[
            "Your education-related complaint has been sent to the Education Department. An educational officer will investigate within 2-3 days.",
            "Thank you for reporting this educational issue. Academic standards and facilities will be reviewed.",
            "We acknowledge your education complaint. Student welfare and educational quality are paramount.",
        ],
        (Category::Infrastructure, _) => &[
            "Thank you for reporting this infrastructure issue. We've forwarded your complaint to the Public Works Department. Expected resolution time: 3-5 business days.",
            "Your infrastructure concern has been logged with high priority. Our engineering team will assess the situation and provide an update within 48 hours.",
            "We acknowledge your infrastructure complaint. The relevant authorities have been notified and will investigate this matter promptly.",
        ],
    }
}

fn general_replies(language: &str) -> &'static [&'static str] {
    match language {
        "hi" => &[
            "समाधान AI से संपर्क करने के लिए धन्यवाद। मैं आपकी चिंता समझता हूं और आपकी शिकायत दर्ज कर ली है। हमारी टीम इसकी समीक्षा करेगी और 24-48 घंटों में जवाब देगी।",
            "इस मामले को हमारे ध्यान में लाने के लिए धन्यवाद। आपकी शिकायत प्राप्त हो गई है और तुरंत कार्रवाई के लिए उपयुक्त विभाग को सौंपी जाएगी।",
            "आपके संदेश के लिए धन्यवाद। मैंने आपकी चिंता दर्ज कर ली है और इसे हमारी मानक प्रक्रियाओं के अनुसार संसाधित किया जाएगा।",
        ],
        "bn" => &[
            "সমাধান AI-এর সাথে যোগাযোগ করার জন্য ধন্যবাদ। আমি আপনার উদ্বেগ বুঝতে পারছি এবং আপনার অভিযোগ লগ করেছি। আমাদের দল এটি পর্যালোচনা করবে এবং ২৪-৪৮ ঘন্টার মধ্যে উত্তর দেবে।",
            "এই বিষয়টি আমাদের নজরে আনার জন্য ধন্যবাদ। আপনার অভিযোগ পাওয়া গেছে এবং দ্রুত পদক্ষেপের জন্য উপযুক্ত বিভাগে পাঠানো হবে।",
        ],
        "ta" => &[
            "சமாதான் AI-ஐ தொடர்பு கொண்டதற்கு நன்றி। உங்கள் கவலையை நான் புரிந்துகொள்கிறேன் மற்றும் உங்கள் புகாரை பதிவு செய்துள்ளேன். எங்கள் குழு இதை மதிப்பாய்வு செய்து 24-48 மணி நேரத்தில் பதிலளிக்கும்।",
        ],
        "te" => &[
            "సమాధాన్ AI ని సంప్రదించినందుకు ధన్యవాదాలు. మీ ఆందోళనను నేను అర్థం చేసుకున్నాను మరియు మీ ఫిర్యాదును లాగ్ చేసాను. మా బృందం దీనిని సమీక్షించి 24-48 గంటల్లో ప్రతిస్పందిస్తుంది।",
        ],
        "mr" => &[
            "समाधान AI शी संपर्क साधल्याबद्दल धन्यवाद. मला तुमची चिंता समजली आहे आणि तुमची तक्रार नोंदवली आहे. आमची टीम याचे पुनरावलोकन करेल आणि 24-48 तासांत प्रतिसाद देईल.",
        ],
        _ => &[
            "Thank you for contacting Samadhan AI. I understand your concern and have logged your complaint. Our team will review it and respond within 24-48 hours.",
            "I appreciate you bringing this matter to our attention. Your complaint has been received and will be assigned to the appropriate department for prompt action.",
            "Thank you for your message. I've recorded your concern and it will be processed according to our standard procedures. You can expect an update soon.",
            "Your complaint has been successfully logged in our system. Our dedicated team will investigate this matter and provide you with a resolution timeline shortly.",
            "I acknowledge your concern and have forwarded it to the relevant authorities. We take all citizen complaints seriously and will ensure proper action is taken.",
        ],
    }
}

fn pick(replies: &'static [&'static str]) -> &'static str {
    replies
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

/// A department-specific acknowledgement, prefixed for urgent complaints.
///
/// Uncategorised complaints get a generic acknowledgement in the caller's
/// language. Other languages without category replies fall back to English.
pub fn category_reply(category: Category, priority: Priority, language: &str) -> String {
    let reply = pick(category_replies(category, base_language(language)));
    match priority {
        Priority::Critical => format!(
            "URGENT: {reply} This has been marked as critical priority and will receive immediate attention."
        ),
        Priority::High => {
            format!("HIGH PRIORITY: {reply} This will be expedited for faster resolution.")
        }
        Priority::Low | Priority::Medium => reply.to_string(),
    }
}

/// A generic acknowledgement in the caller's language (English if unknown).
pub fn general_reply(language: &str) -> &'static str {
    pick(general_replies(base_language(language)))
}

/// Reply sent alongside an error response.
pub fn apology() -> String {
    format!(
        "I apologize for the error. Please contact CM Helpline {CM_HELPLINE} for immediate assistance."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_reply_matches_category_and_language() {
        for _ in 0..10 {
            let reply = category_reply(Category::Traffic, Priority::Medium, "en-US");
            assert!(category_replies(Category::Traffic, "en").contains(&reply.as_str()));
        }
        let hindi = category_reply(Category::Utilities, Priority::Low, "hi-IN");
        assert!(hindi.contains("जल आपूर्ति"));
        let tamil = category_reply(Category::Education, Priority::Low, "ta");
        assert!(tamil.contains("Education Department") || tamil.contains("educational"));
    }

    #[test]
    fn uncategorised_reply_is_generic() {
        let reply = category_reply(Category::Other, Priority::Medium, "hi-IN");
        assert!(general_replies("hi").contains(&reply.as_str()));
        let urgent = category_reply(Category::Other, Priority::Critical, "en");
        assert!(urgent.starts_with("URGENT: "));
        assert!(!urgent.contains("infrastructure"));
    }

    #[test]
    fn urgent_priorities_are_prefixed() {
        let critical = category_reply(Category::Healthcare, Priority::Critical, "en");
        assert!(critical.starts_with("URGENT: "));
        assert!(critical.ends_with("immediate attention."));
        let high = category_reply(Category::Healthcare, Priority::High, "en");
        assert!(high.starts_with("HIGH PRIORITY: "));
    }

    #[test]
    fn general_reply_falls_back_to_english() {
        assert!(general_replies("en").contains(&general_reply("fr-FR")));
        assert!(general_replies("bn").contains(&general_reply("bn-IN")));
    }

    #[test]
    fn apology_quotes_helpline() {
        assert!(apology().contains("1076"));
    }
}

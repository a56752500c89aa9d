use serde::Serialize;

// Feedback shown above the contact form

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Success,
    Warning,
    Error,
}

// Outcomes that reach the page through a redirect (`/?notice=<code>`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Thanks,
    MailMissing,
    MailFailed,
    SaveFailed,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::Thanks => "thanks",
            Notice::MailMissing => "mail-missing",
            Notice::MailFailed => "mail-failed",
            Notice::SaveFailed => "save-failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "thanks" => Some(Notice::Thanks),
            "mail-missing" => Some(Notice::MailMissing),
            "mail-failed" => Some(Notice::MailFailed),
            "save-failed" => Some(Notice::SaveFailed),
            _ => None,
        }
    }

    pub fn redirect_target(self) -> String {
        format!("/?notice={}#contact", self.code())
    }

    pub fn kind(self) -> Kind {
        match self {
            Notice::Thanks => Kind::Success,
            Notice::MailMissing | Notice::MailFailed => Kind::Warning,
            Notice::SaveFailed => Kind::Error,
        }
    }

    pub fn text(self, contact_phone: &str) -> String {
        match self {
            Notice::Thanks => THANKS.to_string(),
            Notice::MailMissing => {
                format!("הפרטים נקלטו, אך הגדרות המייל חסרות. אפשר ליצור קשר גם בטלפון {contact_phone}.")
            }
            Notice::MailFailed => {
                format!("הפרטים נקלטו, אך שליחת המייל נכשלה. אפשר להתקשר {contact_phone}.")
            }
            Notice::SaveFailed => {
                format!("אירעה תקלה בשמירת הפרטים. אפשר להתקשר {contact_phone}.")
            }
        }
    }
}

pub const THANKS: &str = "תודה! הפרטים נקלטו ונחזור אליך בהקדם.";
pub const RATE_LIMITED: &str = "ביצעת יותר מדי שליחות בזמן קצר. נסה/י שוב בעוד מספר דקות.";
pub const MISSING_FIELDS: &str = "אנא מלא/י שם מלא וטלפון.";
pub const INVALID_PHONE: &str = "מספר הטלפון אינו תקין.";

mod question;

pub use question::QuestionRecord;

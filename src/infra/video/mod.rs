pub mod twilio_issuer;

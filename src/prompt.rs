//! Prompt builder: renders the five generation parameters into the
//! instruction template sent to the generation service.
//!
//! The template is the only lever we have over a probabilistic generator, so
//! it spells out the output grammar and the answer-distribution requirement
//! explicitly. The parser still enforces both independently.

use crate::config::Prompts;
use crate::domain::GenerationRequest;
use crate::util::fill_template;

/// Pure render of the request into the instruction text. Field validation is
/// the caller's responsibility; this never fails.
pub fn build_prompt(prompts: &Prompts, req: &GenerationRequest) -> String {
  fill_template(
    &prompts.mcq_template,
    &[
      ("board", req.board.trim()),
      ("class", req.class_name.trim()),
      ("subject", req.subject.trim()),
      ("chapter", req.chapter.trim()),
      ("difficulty", req.difficulty.trim()),
    ],
  )
}

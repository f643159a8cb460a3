//! Instruction and task texts for the review stages.
//!
//! Instructions become a participant's system prompt; tasks are the first transcript message
//! of a stage conversation. Every builder that asks for a final answer embeds the delimited
//! output template so the reply can be picked apart by [`crate::extraction`].

use crate::litreview::extraction::OutputMarkers;
use crate::litreview::papers::Paper;

pub const SUMMARIZER_NAME: &str = "summarization_agent";
pub const FILTER_NAME: &str = "filter_agent";
pub const WRITER_NAME: &str = "literature_review_writer";
pub const EDITOR_NAME: &str = "literature_review_editor";

/// Template asking for one block per paper between the markers.
fn paper_list_template(markers: &OutputMarkers) -> String {
    format!(
        "{start}\n\
         {{paper 1}}:\n\
         - Title: {{title}}\n\
         - link: {{link}}\n\
         - Summary: {{summary of the whole paper based on your understanding}}\n\
         {{paper 2}}:\n\
         - Title: {{title}}\n\
         - link: {{link}}\n\
         - Summary: {{summary of the whole paper based on your understanding}}\n\
         and so on...\n\
         {end}\n\
         {reminder}",
        start = markers.start,
        end = markers.end,
        reminder = marker_reminder(markers),
    )
}

fn final_draft_template(markers: &OutputMarkers) -> String {
    format!(
        "{}\nWrite the final draft here.\n{}",
        markers.start, markers.end
    )
}

fn marker_reminder(markers: &OutputMarkers) -> String {
    format!(
        "MAKE SURE TO USE THE ABOVE TEMPLATE FOR THE OUTPUT, i.e. the separators {} and {} must be present.",
        markers.start, markers.end
    )
}

/// Numbered listing of fetched papers, one entry per paper, 1-based.
pub fn format_paper_list(papers: &[Paper]) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{} : Title : {}\nDescription : {}\nLINK : {}\n\n",
                i + 1,
                p.title,
                p.summary,
                p.link
            )
        })
        .collect()
}

pub fn summarizer_instruction(summary_word_count: usize, markers: &OutputMarkers) -> String {
    format!(
        "You are a knowledgeable research assistant who writes a summary of each paper.\n\
         The user gives you a list of papers. Summarize each paper in {} words, using the URL \
         provided for it.\n\
         Summarize them in the following format:\n\n{}",
        summary_word_count,
        paper_list_template(markers)
    )
}

pub fn summarize_task(papers: &[Paper]) -> String {
    format!(
        "Give summarization of following papers :\n\n{}",
        format_paper_list(papers)
    )
}

pub fn filter_instruction() -> String {
    "You are a knowledgeable researcher who filters papers based on the summaries provided \
     by the summarization agent.\n\
     Your job is to filter out the papers which are not relevant to the user's literature \
     review topic.\n\
     If any paper is not relevant to that topic, remove it from the list."
        .to_string()
}

pub fn filter_task(summaries: &str, topic: &str, markers: &OutputMarkers) -> String {
    format!(
        "Given below is a list of papers with information like summary, title and online link:\n\
         {summaries}\n\
         TASK :\n\
         Take a deep look at the papers by visiting the links provided.\n\
         Remove the papers which are not relevant to the user topic **{topic}**.\n\
         The OUTPUT should contain the relevant papers in the following template:\n{template}",
        summaries = summaries,
        topic = topic,
        template = paper_list_template(markers),
    )
}

pub fn writer_instruction(review_word_count: usize, sentinel: &str, markers: &OutputMarkers) -> String {
    format!(
        "You are a writer who helps write literature reviews for the user on the given topic.\n\
         Make sure the literature review is written in {words} words.\n\
         You are allowed to ask the editor agent for feedback.\n\
         If the editor agent asks for changes, make the changes and ask for approval again.\n\
         If the editor agent approves the task, end the conversation by saying **'{sentinel}'** \
         and by giving the final draft in the following template:\n\
         {template}\n\
         DO NOT FORGET: {reminder}",
        words = review_word_count,
        sentinel = sentinel,
        template = final_draft_template(markers),
        reminder = marker_reminder(markers),
    )
}

pub fn editor_instruction() -> String {
    "You are an editor who is a knowledgeable researcher too. Plan and guide the task given by \
     the user. Provide critical feedback on the draft produced by the writer.\n\
     Approve if the task is completed and the draft meets the user's requirements."
        .to_string()
}

pub fn draft_task(topic: &str, review_word_count: usize, summaries: &str, markers: &OutputMarkers) -> String {
    format!(
        "Write a literature review on {topic} in {words} words.\n\
         PLEASE PROVIDE THE FINAL OUTPUT IN THE FOLLOWING TEMPLATE:\n\
         {template}\n\
         Please use the following papers in drafting the final literature review:\n\
         {summaries}",
        topic = topic,
        words = review_word_count,
        template = final_draft_template(markers),
        summaries = summaries,
    )
}

pub fn revise_writer_instruction(
    review_word_count: usize,
    sentinel: &str,
    markers: &OutputMarkers,
) -> String {
    format!(
        "You are a writer who is going to make changes to the given literature review draft.\n\
         Make sure the revised literature review is written in {words} words.\n\
         The editor will ask you to make changes to the draft.\n\
         If the editor agent asks for changes, make the appropriate changes and ask for approval again.\n\
         If the editor agent approves the task, end the conversation by saying **'{sentinel}'** \
         and by giving the final draft in the following template:\n\
         {template}\n\
         {reminder}",
        words = review_word_count,
        sentinel = sentinel,
        template = final_draft_template(markers),
        reminder = marker_reminder(markers),
    )
}

pub fn revise_editor_instruction(review_word_count: usize) -> String {
    format!(
        "You are an editor who is a knowledgeable researcher too.\n\
         The user has given you a literature review draft and asks for minor changes.\n\
         Your job is to understand what changes the user wants and instruct the writer agent \
         to make them.\n\
         Make sure the writer agent's final review is written in {} words.\n\
         If the writer agent has not made the changes correctly, give it appropriate feedback.\n\
         Otherwise approve once the task is completed and the draft meets the user's requirements.",
        review_word_count
    )
}

pub fn revise_task(feedback: &str, draft: &str) -> String {
    format!(
        "Please make the changes to the draft\nUser Change request : {}\nDraft to edit :\n{}",
        feedback, draft
    )
}

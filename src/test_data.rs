#![cfg(test)]

pub const POST_DATA: &str = r#"+++
title = "What I learned after 20 years of software development"
date = "2022-04-02 12:05:00"
tags = ["career", "software"]
+++
How to be a great software engineer?

Someone asked me this question today and I came up with a list of what I try to do myself.

<!-- more -->

## Non technical

Have an honest image of yourself.
"#;

pub const THOUGHT_DATA: &str = r#"+++
date = "2024-03-15 09:30:00"
tags = ["musings"]
+++
Naming things is the only hard problem. Cache invalidation is just naming the moment a name goes stale.
"#;

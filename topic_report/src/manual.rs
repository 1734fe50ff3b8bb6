/*!

This is the long-form manual for `topic_report` and `fbreport`.

## Input format

The input is the response export of the course feedback form, one response per row,
with a header row. The columns are read by position; the header text is ignored. The
export must have at least 70 columns. Column 0 (the submission timestamp) is never
analyzed.

| Topic | Columns (0-based) |
|---|---|
| Resources | 1, 28 |
| Office Hours | 2 to 23 |
| Lecture | 24, 25, 26, 27, 29 |
| Ed | 30 to 43 |
| Lab | 44 to 50, 69 |
| GSI | 53 to 64 |
| AI | 65 to 68 |
| All | 1 to the last column |

Supported providers:
* `csv` Comma Separated Values, as downloaded from the form tool
* `xlsx` Excel workbook. Use `--excel-worksheet-name` when the workbook has several sheets.

Empty cells and the usual not-available markers (`NA`, `N/A`, `NaN`, `null`, ...) are
missing values. Cells that read as numbers are numbers.

## Scores

Categorical answers are turned into scores before averaging:

* GSI and AI: `Needs Improvement` = 0, `Average` = 0.5, `Excellent` = 1. The GSI overall
  grade is divided by 5 and the worksheet pacing becomes 1 when the answer is `2`
  (well paced), 0 otherwise.
* Lab: the six worksheet and notebook ratings are divided by 5. The time spent outside of
  lab is converted to minutes (the middle of each bucket, 135 for `2+ hours`).
* Ed and Office Hours: the usage questions go from 1 (most common) to 5 (never); they are
  reported as `(6 - answer) / 5` so that 1 means "used the most". Answer quality is
  divided by 5, `Excellent`/`Good`/`Poor` are 1/0.5/0. For Office Hours, `Yes`/`No` are
  1/0, the "I have not attended" answers are ignored and wait times are in minutes.
* Lecture and Resources: ratings are divided by 5.

Each metric is reported with its mean and sample standard deviation, computed over the
answers present in that column. With a single answer, the standard deviation is `NaN`.
An answer that is not a number and is not covered by the scores above makes the topic
fail; the other topics are still reported.

## Multiple choice answers

Answers made of several comma-separated options are split and each option is counted.
For the "Experienced" questions of Ed and Office Hours, the answer
`None of the above.` is not counted.

## Output

`fbreport` prints each topic as Markdown, with means and standard deviations rounded to 3
decimals. With `--out`, the full precision summary is written in JSON:

```text
fbreport -i responses.csv --topic GSI --topic "Office Hours" --out summary.json
```

*/

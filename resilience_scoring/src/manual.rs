/*!

This is the long-form manual for `resilience_scoring` and `rag-resilience`.

## Scoring

Every question of the survey is scored on a Likert scale, with scores between 0 and 5.
The answers are converted to scores with the mapping provided in the configuration:
an answer matches a label when both are equal once surrounding spaces are removed and
case is ignored. There is no approximate matching. Answers that do not match any
label are reported as warnings and ignored in all the computations, so that the
mapping can be completed and the analysis run again. Blank answers are ignored
as well (they are not counted as neutral).

For each question, the average of the valid scores and the descriptive statistics
(count, median, mode, sample standard deviation, minimum, maximum) are computed.
When several values are equally frequent, the mode is the largest of them.

The questions are grouped into the four resilience potentials: `Response`,
`Monitor`, `Anticipate` and `Learn`. The averages of the questions of one potential
are drawn on a radar chart, and the score of the potential is the area of this
polygon divided by the area of the polygon drawn with the maximum score (5)
everywhere. A potential needs at least 3 questions to enclose an area: with 1 or 2
questions, its area and its score are 0.

The overall resilience is the sum of the areas of the four potentials divided by the
sum of their maximum areas. Potentials with more questions weigh more in the
overall score.

| Score      | Rating    | Overall level       |
|------------|-----------|---------------------|
| 85 - 100   | Excellent | Resilient Leader    |
| 70 - 85    | Good      | Resilient Performer |
| 50 - 70    | Fair      | Basic Assurance     |
| 0 - 50     | Critical  | Vulnerable          |

Potentials scoring at least 80 are listed as strengths, and those below 60 as
weaknesses.

## Input formats

### Survey

The survey is an Excel workbook (first worksheet, or the one given with
`--excel-worksheet-name`) or a CSV file. The first row is the header. Each
following row is one respondent. Rows without any content are skipped.

|    | A         | B         | C              | D        | ... |
|----|-----------|-----------|----------------|----------|-----|
| 1  | Timestamp | Name      | Question 1     | Question 2 |   |
| 2  | ...       | Alice     | Strongly Agree | Neutral  |     |
| 3  | ...       | Bob       | Agree          | Agree    |     |

### Configuration

The configuration is an Excel workbook with the following sheets:

* `Settings` (required): a row whose first cell mentions the start column (for
  example `Start Column`), followed by the 0-based index of the column of the first
  question. In the example above, this index is `2`.
* `Likert_Mapping` (required): after a header row, one answer label per row in
  column A and its score in column B. Scores are integers from 0 to 5. When a
  label appears twice, the last row wins and a warning is logged.
* `Question_Mapping` (required): a header row with the columns `Potential` and
  `Focus`, then one row per question, in the order of the columns of the survey.
* `Colors` (optional): after a header row, a potential in column A and a color in
  column B.

The same configuration can be written in JSON:

```json
{
  "startColumn": 2,
  "likertMap": [
    { "answer": "Strongly Disagree", "score": 1 },
    { "answer": "Strongly Agree", "score": 5 }
  ],
  "questions": [
    { "potential": "Response", "focus": "1.1 Event Response" },
    { "potential": "Monitor", "focus": "2.1 Indicators" }
  ],
  "colors": { "Response": "#3b82f6" }
}
```

The survey must have enough columns for all the questions: the analysis is refused
otherwise.

 */
